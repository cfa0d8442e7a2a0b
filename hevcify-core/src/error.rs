// ============================================================================
// hevcify-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Types
//
// Fatal errors (destination creation, audit log writes, invalid targets)
// bubble out of the batch runner. Per-file failures (probe, encode, move)
// are also expressed as CoreError inside the conversion engine, but the
// engine turns them into an Outcome before returning.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for hevcify-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Required external command not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Command '{command}' exited with status {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Failed to probe {path}: {message}")]
    ProbeFailure { path: PathBuf, message: String },

    #[error("Unable to create destination directory {path}: {source}")]
    DestinationCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to write audit log {path}: {source}")]
    LogWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    PathError(String),
}

impl CoreError {
    /// Whether this error must terminate the whole run.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CoreError::DestinationCreation { .. }
                | CoreError::LogWrite { .. }
                | CoreError::InvalidTarget(_)
                | CoreError::DependencyNotFound(_)
                | CoreError::Config(_)
        )
    }
}

/// Result type for hevcify-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Lines of tool stderr kept in a `CommandFailed` error.
pub const STDERR_TAIL_LINES: usize = 20;

/// Shorthand used by the command runner when a tool exits non-zero.
///
/// Only the last `STDERR_TAIL_LINES` lines are kept. ffmpeg separates its
/// progress updates with carriage returns, so both `\r` and `\n` end a line.
pub(crate) fn command_failed_error(command: &str, exit_code: i32, stderr: &[u8]) -> CoreError {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let tail = &lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..];

    CoreError::CommandFailed {
        command: command.to_string(),
        exit_code,
        stderr: tail.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let destination = CoreError::DestinationCreation {
            path: PathBuf::from("/gone/hevc"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing parent"),
        };
        assert!(destination.is_fatal());

        let probe = CoreError::ProbeFailure {
            path: PathBuf::from("a.mkv"),
            message: "exit 1".to_string(),
        };
        assert!(!probe.is_fatal());
        assert!(!CoreError::DestinationExists(PathBuf::from("hevc/a.mkv")).is_fatal());
    }

    #[test]
    fn test_command_failed_trims_stderr() {
        let err = command_failed_error("ffmpeg", 1, b"  broken pipe\n");
        assert_eq!(err.to_string(), "Command 'ffmpeg' exited with status 1: broken pipe");
    }

    #[test]
    fn test_command_failed_keeps_only_stderr_tail() {
        let mut stderr = String::new();
        for frame in 0..20_000 {
            stderr.push_str(&format!("frame={frame} fps=30 q=28.0 size=1024kB\r"));
        }
        stderr.push_str("Conversion failed!\n");

        let err = command_failed_error("ffmpeg", 1, stderr.as_bytes());
        let CoreError::CommandFailed { stderr: kept, .. } = &err else {
            panic!("expected CommandFailed, got {err:?}");
        };
        assert_eq!(kept.lines().count(), STDERR_TAIL_LINES);
        assert!(kept.ends_with("Conversion failed!"));
        assert!(kept.starts_with("frame=19981 "));
        assert!(err.to_string().len() < 2_000);
    }
}
