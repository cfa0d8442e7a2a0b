//! ffprobe integration for codec inspection.
//!
//! Asks ffprobe for the `index` and `codec_name` of every stream as JSON and
//! reduces the answer to a list of [`StreamCodec`]. Nothing here touches the
//! file system beyond reading the media file through ffprobe.

use crate::error::{CoreError, CoreResult};
use crate::external::{CommandRunner, os_args};
use serde::Deserialize;
use std::path::Path;

/// Codec information for one stream of a media file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamCodec {
    pub index: u32,
    /// Absent for data/attachment streams ffprobe cannot name
    #[serde(default)]
    pub codec_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<StreamCodec>,
}

/// Arguments for the stream codec query.
fn probe_args(input_path: &Path) -> Vec<std::ffi::OsString> {
    let mut args = os_args([
        "-v",
        "error",
        "-show_entries",
        "stream=index,codec_name",
        "-of",
        "json",
    ]);
    args.push(input_path.as_os_str().to_os_string());
    args
}

/// Parses ffprobe's JSON stream listing.
pub fn parse_stream_codecs(json: &str) -> Result<Vec<StreamCodec>, serde_json::Error> {
    let output: ProbeOutput = serde_json::from_str(json)?;
    Ok(output.streams)
}

/// Gets the codec of every stream in `input_path`.
///
/// Any failure (tool missing, non-zero exit, malformed JSON) is reported as
/// `CoreError::ProbeFailure`; the caller decides what to do about it.
pub fn probe_stream_codecs<R: CommandRunner>(
    runner: &R,
    ffprobe_command: &str,
    input_path: &Path,
) -> CoreResult<Vec<StreamCodec>> {
    log::debug!("Probing stream codecs for: {}", input_path.display());

    let output = runner
        .run(ffprobe_command, &probe_args(input_path))
        .map_err(|e| CoreError::ProbeFailure {
            path: input_path.to_path_buf(),
            message: e.to_string(),
        })?;

    let streams = parse_stream_codecs(&output.stdout).map_err(|e| CoreError::ProbeFailure {
        path: input_path.to_path_buf(),
        message: format!("unparsable ffprobe output: {e}"),
    })?;

    if streams.is_empty() {
        log::warn!("No streams found by ffprobe for {}", input_path.display());
    }
    Ok(streams)
}

/// Whether any stream is already encoded with `codec` (case-insensitive).
#[must_use]
pub fn has_codec(streams: &[StreamCodec], codec: &str) -> bool {
    streams.iter().any(|stream| {
        stream
            .codec_name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(codec))
    })
}
