// hevcify-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use hevcify_core::CoreConfig;
use hevcify_core::config::{DEFAULT_TARGET_CODEC, DEFAULT_VIDEO_ENCODER};

use clap::Parser;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "hevcify: normalise a directory of videos to HEVC",
    long_about = "Moves files that are already HEVC into ./hevc, re-encodes everything else \
                  with ffmpeg and archives the originals. Every decision is appended to HEVC.log \
                  in the source directory."
)]
pub struct Cli {
    /// File or directory to process (defaults to the current directory)
    #[arg(value_name = "TARGET")]
    pub targets: Vec<PathBuf>,

    /// Skip the confirmation prompt for directory runs
    #[arg(short = 'y', long = "yes", env = "HEVCIFY_ASSUME_YES")]
    pub assume_yes: bool,

    /// Leave originals in place after a successful re-encode
    #[arg(long, env = "HEVCIFY_NO_ARCHIVE")]
    pub no_archive: bool,

    /// Codec name that counts as already converted
    #[arg(long, value_name = "NAME", env = "HEVCIFY_CODEC", default_value = DEFAULT_TARGET_CODEC)]
    pub codec: String,

    /// ffmpeg video encoder used for re-encodes
    #[arg(long, value_name = "NAME", env = "HEVCIFY_ENCODER", default_value = DEFAULT_VIDEO_ENCODER)]
    pub encoder: String,

    /// Comma-separated media extensions to process (e.g. mp4,mkv,avi)
    #[arg(long, value_name = "LIST", value_delimiter = ',', env = "HEVCIFY_EXTENSIONS")]
    pub extensions: Option<Vec<String>>,

    /// Enable debug diagnostics on stderr
    #[arg(short, long, env = "HEVCIFY_VERBOSE")]
    pub verbose: bool,
}

impl Cli {
    /// Builds the core configuration from the parsed options.
    #[must_use]
    pub fn core_config(&self) -> CoreConfig {
        let mut config = CoreConfig {
            target_codec: self.codec.clone(),
            video_encoder: self.encoder.clone(),
            archive_originals: !self.no_archive,
            ..CoreConfig::default()
        };
        if let Some(extensions) = &self.extensions {
            config.set_media_extensions(extensions.iter().map(String::as_str));
        }
        config
    }
}
