//! FFmpeg command building and execution for the transcode step.
//!
//! The video stream is re-encoded with the configured encoder, audio is
//! copied untouched and the container title is cleared. The output path is
//! always the last argument.

use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::{CommandRunner, os_args};

use std::ffi::OsString;
use std::path::Path;
use std::time::Instant;

/// Builds the ffmpeg argument list for a single transcode.
///
/// `-n` makes ffmpeg refuse to overwrite an existing output, so a file that
/// appears between the duplicate check and the encode is never clobbered.
#[must_use]
pub fn build_encode_args(config: &CoreConfig, input_path: &Path, output_path: &Path) -> Vec<OsString> {
    let mut args = os_args(["-hide_banner", "-nostdin", "-n", "-i"]);
    args.push(input_path.as_os_str().to_os_string());
    args.extend(os_args([
        "-metadata",
        "title=",
        "-c:v",
        config.video_encoder.as_str(),
        "-c:a",
        "copy",
    ]));
    args.push(output_path.as_os_str().to_os_string());
    args
}

/// Runs ffmpeg to produce `output_path` from `input_path`.
///
/// ffmpeg's stderr (progress and diagnostics) streams to the terminal while
/// it runs. Any non-zero exit is a total failure; cleaning up a partial
/// output is the caller's job.
pub fn run_ffmpeg_encode<R: CommandRunner>(
    runner: &R,
    config: &CoreConfig,
    input_path: &Path,
    output_path: &Path,
) -> CoreResult<()> {
    let start_time = Instant::now();
    let args = build_encode_args(config, input_path, output_path);

    let output = runner.run_streaming(&config.ffmpeg_command, &args)?;
    if !output.stdout.trim().is_empty() {
        log::debug!("ffmpeg output: {}", output.stdout.trim());
    }

    log::debug!(
        "Encoded {} in {:.1}s",
        input_path.display(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::external::mocks::MockCommandRunner;

    fn lossy(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_build_encode_args() {
        let config = CoreConfig::default();
        let args = build_encode_args(&config, Path::new("/in/a.avi"), Path::new("/in/hevc/a.mp4"));
        assert_eq!(
            lossy(&args),
            vec![
                "-hide_banner", "-nostdin", "-n", "-i", "/in/a.avi", "-metadata", "title=",
                "-c:v", "hevc", "-c:a", "copy", "/in/hevc/a.mp4",
            ]
        );
    }

    #[test]
    fn test_build_encode_args_custom_encoder() {
        let config = CoreConfig {
            video_encoder: "libx265".to_string(),
            ..CoreConfig::default()
        };
        let args = lossy(&build_encode_args(&config, Path::new("a.mkv"), Path::new("b.mp4")));
        let pos = args.iter().position(|a| a == "-c:v").unwrap();
        assert_eq!(args[pos + 1], "libx265");
    }

    #[test]
    fn test_run_ffmpeg_encode_propagates_failure() {
        let runner = MockCommandRunner::new();
        runner.expect_exit_error("ffmpeg", "a.mp4", 1);

        let err = run_ffmpeg_encode(
            &runner,
            &CoreConfig::default(),
            Path::new("a.mp4"),
            Path::new("hevc/a.mp4"),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::CommandFailed { exit_code: 1, .. }));
    }
}
