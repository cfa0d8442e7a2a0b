// ============================================================================
// hevcify-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Exit-code mapping for fatal errors
//
// Per-file problems never reach this point; they are outcomes inside the
// batch. What arrives here stops the run, and the process exit code tells
// scripts which kind of stop it was.

// ---- Internal crate imports ----
use hevcify_core::CoreError;

/// Type alias for CLI results.
pub type CliResult<T> = anyhow::Result<T>;

/// Generic failure (including a missing ffmpeg/ffprobe).
pub const EXIT_FAILURE: i32 = 1;
/// Invalid invocation: bad target, too many targets, bad options.
pub const EXIT_USAGE: i32 = 2;
/// An output or archive directory could not be created.
pub const EXIT_DESTINATION: i32 = 3;
/// HEVC.log could not be appended to.
pub const EXIT_LOG_WRITE: i32 = 4;

/// Maps an error that ended the run to the process exit code.
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<CoreError>() {
        Some(CoreError::InvalidTarget(_) | CoreError::Config(_)) => EXIT_USAGE,
        Some(CoreError::DestinationCreation { .. }) => EXIT_DESTINATION,
        Some(CoreError::LogWrite { .. }) => EXIT_LOG_WRITE,
        _ => EXIT_FAILURE,
    }
}
