// ============================================================================
// hevcify-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with External CLI Tools
//
// This module encapsulates every call out to ffprobe and ffmpeg. Both go
// through the CommandRunner trait so the conversion engine can be exercised
// without the real binaries.
//
// KEY COMPONENTS:
// - CommandRunner trait and CommandOutput
// - StdCommandRunner: std::process implementation
// - Dependency checking
// - ffprobe codec inspection (ffprobe_executor)
// - ffmpeg argument building and execution (ffmpeg)
// - Test doubles (mocks)

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_failed_error};

// ---- Standard library imports ----
use std::ffi::{OsStr, OsString};
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// ffmpeg argument building and the transcode call
pub mod ffmpeg;

/// ffprobe invocation and stream codec extraction
pub mod ffprobe_executor;

/// Scripted runner and stepping clock for tests
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::{build_encode_args, run_ffmpeg_encode};
pub use ffprobe_executor::{StreamCodec, has_codec, probe_stream_codecs};

// ============================================================================
// PROCESS EXECUTION
// ============================================================================

/// Captured result of a finished external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub exit_code: i32,
}

/// Runs an external program to completion.
///
/// Implementations block until the process exits. A non-zero exit status
/// must be reported as `CoreError::CommandFailed`, a process that cannot be
/// started as `CoreError::CommandStart`.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[OsString]) -> CoreResult<CommandOutput>;

    /// Like `run`, for long-running tools whose stderr is live progress.
    ///
    /// Implementations may hand stderr to the user's terminal instead of
    /// capturing it; the error of a failed run then carries no stderr.
    fn run_streaming(&self, program: &str, args: &[OsString]) -> CoreResult<CommandOutput> {
        self.run(program, args)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[OsString]) -> CoreResult<CommandOutput> {
        (**self).run(program, args)
    }

    fn run_streaming(&self, program: &str, args: &[OsString]) -> CoreResult<CommandOutput> {
        (**self).run_streaming(program, args)
    }
}

/// Standard implementation of CommandRunner using `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdCommandRunner;

impl CommandRunner for StdCommandRunner {
    fn run(&self, program: &str, args: &[OsString]) -> CoreResult<CommandOutput> {
        log::debug!("Running: {}", format_command_line(program, args));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(program, e))?;

        // A process killed by a signal has no code
        let exit_code = output.status.code().unwrap_or(-1);
        if !output.status.success() {
            let err = command_failed_error(program, exit_code, &output.stderr);
            log::debug!("{}", err);
            return Err(err);
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            exit_code,
        })
    }

    /// Runs with stderr inherited so ffmpeg's progress reaches the terminal
    /// as it happens. Only stdout is captured.
    fn run_streaming(&self, program: &str, args: &[OsString]) -> CoreResult<CommandOutput> {
        log::debug!("Running (streaming): {}", format_command_line(program, args));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| spawn_error(program, e))?;

        let exit_code = output.status.code().unwrap_or(-1);
        if !output.status.success() {
            return Err(command_failed_error(program, exit_code, &output.stderr));
        }

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            exit_code,
        })
    }
}

fn spawn_error(program: &str, e: io::Error) -> CoreError {
    if e.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(program.to_string())
    } else {
        CoreError::CommandStart(program.to_string(), e)
    }
}

/// Renders a command line for diagnostics, quoting arguments with spaces.
#[must_use]
pub fn format_command_line(program: &str, args: &[OsString]) -> String {
    let mut line = program.to_string();
    for arg in args {
        let arg = arg.to_string_lossy();
        line.push(' ');
        if arg.is_empty() || arg.contains(' ') {
            line.push('"');
            line.push_str(&arg);
            line.push('"');
        } else {
            line.push_str(&arg);
        }
    }
    line
}

/// Collects string-like arguments into the owned form `CommandRunner` takes.
pub(crate) fn os_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter().map(|arg| arg.as_ref().to_os_string()).collect()
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that a required external command can be started.
///
/// Runs `<cmd_name> -version` through `runner`. Only a missing binary is an
/// error; a tool that starts but exits non-zero is still considered present.
pub fn check_dependency<R: CommandRunner>(runner: &R, cmd_name: &str) -> CoreResult<()> {
    match runner.run(cmd_name, &os_args(["-version"])) {
        Ok(_) | Err(CoreError::CommandFailed { .. }) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(CoreError::DependencyNotFound(_)) => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(CoreError::CommandStart(_, e)) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(e)
        }
    }
}
