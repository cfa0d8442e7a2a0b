// ============================================================================
// hevcify-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines CoreConfig, the set of knobs the conversion engine and
// batch runner consult: which codec counts as "already done", which
// extensions are media, where outputs and originals go, and which external
// tools to call.
//
// USAGE:
// Instances of CoreConfig are created by consumers of the library (like
// hevcify-cli), usually from `CoreConfig::default()` with CLI overrides, and
// passed by reference into `run_batch` / `convert_file`.

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Codec name ffprobe reports for files that need no re-encode.
pub const DEFAULT_TARGET_CODEC: &str = "hevc";

/// Video encoder handed to ffmpeg's `-c:v`.
pub const DEFAULT_VIDEO_ENCODER: &str = "hevc";

/// Extensions (without the dot) treated as recognised media.
pub const DEFAULT_MEDIA_EXTENSIONS: [&str; 5] = ["mp4", "mkv", "avi", "mov", "wmv"];

/// Container extension of every transcoded output.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "mp4";

/// Subdirectory of the source directory receiving encoded files.
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "hevc";

/// Subdirectory of the source directory receiving archived originals.
pub const DEFAULT_ARCHIVE_DIR_NAME: &str = "archive";

/// Audit log file name, placed in the source directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "HEVC.log";

pub const DEFAULT_FFMPEG_COMMAND: &str = "ffmpeg";
pub const DEFAULT_FFPROBE_COMMAND: &str = "ffprobe";

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration structure for the hevcify-core library.
///
/// # Examples
///
/// ```rust
/// use hevcify_core::CoreConfig;
///
/// let mut config = CoreConfig::default();
/// config.archive_originals = false;
/// config.validate().unwrap();
/// assert!(config.is_media_extension("MKV"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    // ---- Codec Settings ----

    /// Codec name that marks a file as already encoded (compared
    /// case-insensitively against ffprobe's `codec_name`)
    pub target_codec: String,

    /// Encoder passed to ffmpeg for the video stream; audio is always copied
    pub video_encoder: String,

    /// Extension of the transcoded output (no leading dot)
    pub output_extension: String,

    /// Recognised media extensions, lowercase, no leading dot
    pub media_extensions: Vec<String>,

    // ---- Layout ----

    pub output_dir_name: String,
    pub archive_dir_name: String,
    pub log_file_name: String,

    /// Move originals into the archive directory after a successful encode
    pub archive_originals: bool,

    // ---- External Tools ----

    pub ffmpeg_command: String,
    pub ffprobe_command: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            target_codec: DEFAULT_TARGET_CODEC.to_string(),
            video_encoder: DEFAULT_VIDEO_ENCODER.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            media_extensions: DEFAULT_MEDIA_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            output_dir_name: DEFAULT_OUTPUT_DIR_NAME.to_string(),
            archive_dir_name: DEFAULT_ARCHIVE_DIR_NAME.to_string(),
            log_file_name: DEFAULT_LOG_FILE_NAME.to_string(),
            archive_originals: true,
            ffmpeg_command: DEFAULT_FFMPEG_COMMAND.to_string(),
            ffprobe_command: DEFAULT_FFPROBE_COMMAND.to_string(),
        }
    }
}

impl CoreConfig {
    /// Replaces the recognised extension list, normalising case and
    /// stripping leading dots (".MKV" -> "mkv").
    pub fn set_media_extensions<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.media_extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
    }

    /// Whether `extension` (no dot) is a recognised media extension.
    #[must_use]
    pub fn is_media_extension(&self, extension: &str) -> bool {
        self.media_extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    }

    /// Names the engine must never report on: its own log file and the
    /// destination directories it creates.
    #[must_use]
    pub fn is_own_artifact(&self, file_name: &str) -> bool {
        file_name == self.log_file_name
            || file_name == self.output_dir_name
            || file_name == self.archive_dir_name
    }

    /// Validates the configuration before any file is touched.
    pub fn validate(&self) -> crate::CoreResult<()> {
        use crate::CoreError;

        if self.target_codec.trim().is_empty() {
            return Err(CoreError::Config("target codec must not be empty".to_string()));
        }
        if self.video_encoder.trim().is_empty() {
            return Err(CoreError::Config("video encoder must not be empty".to_string()));
        }
        if self.output_extension.trim().is_empty() {
            return Err(CoreError::Config("output extension must not be empty".to_string()));
        }
        if self.media_extensions.is_empty() {
            return Err(CoreError::Config(
                "at least one media extension is required".to_string(),
            ));
        }
        for name in [&self.output_dir_name, &self.archive_dir_name, &self.log_file_name] {
            if name.is_empty() || name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
                return Err(CoreError::Config(format!(
                    "'{name}' is not a plain file name"
                )));
            }
        }
        if self.output_dir_name == self.archive_dir_name {
            return Err(CoreError::Config(
                "output and archive directories must differ".to_string(),
            ));
        }
        Ok(())
    }
}
