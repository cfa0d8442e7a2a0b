//! Implementation of the convert run.
//!
//! Resolves the positional target, asks for confirmation before touching a
//! whole directory, verifies ffprobe/ffmpeg when media is present and then
//! hands the plan to the hevcify-core batch runner.

use crate::cli::Cli;
use crate::error::CliResult;

use hevcify_core::external::{CommandRunner, StdCommandRunner, check_dependency};
use hevcify_core::{
    BatchPlan, Clock, CoreConfig, CoreError, CoreResult, EventLog, Outcome, RunSummary,
    SystemClock, Target, execute_batch, format_log_timestamp, plan_batch, resolve_target,
};

use console::style;
use log::{debug, info};

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Turns the positional arguments into a single target.
///
/// No argument means the current directory; more than one is a usage error.
pub fn resolve_cli_target(targets: &[PathBuf]) -> CoreResult<Target> {
    match targets {
        [] => resolve_target(Path::new(".")),
        [single] => resolve_target(single),
        _ => Err(CoreError::InvalidTarget(format!(
            "expected at most one file or directory, got {}",
            targets.len()
        ))),
    }
}

/// Asks whether to process every file in a directory plan.
///
/// Only an explicit "y" or "yes" (any case) confirms; end of input declines.
pub fn confirm_batch<R: BufRead, W: Write>(
    plan: &BatchPlan,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(
        output,
        "Convert {} file(s) in {}? [y/N] ",
        plan.files.len(),
        plan.source_dir.display()
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Checks ffprobe and ffmpeg, but only when the plan holds media files.
fn ensure_dependencies<R: CommandRunner>(
    runner: &R,
    config: &CoreConfig,
    plan: &BatchPlan,
) -> CoreResult<()> {
    if !plan.has_media(config) {
        debug!("No media candidates; skipping dependency check");
        return Ok(());
    }
    check_dependency(runner, &config.ffprobe_command)?;
    check_dependency(runner, &config.ffmpeg_command)?;
    Ok(())
}

/// Runs the whole convert flow with injected collaborators.
///
/// Returns `None` when the user declines the confirmation prompt, in which
/// case nothing on disk has been touched.
pub fn run_convert_with<R, C, I, W>(
    runner: &R,
    clock: &C,
    args: &Cli,
    input: &mut I,
    output: &mut W,
) -> CliResult<Option<RunSummary>>
where
    R: CommandRunner,
    C: Clock,
    I: BufRead,
    W: Write,
{
    let config = args.core_config();
    let target = resolve_cli_target(&args.targets)?;
    let plan = plan_batch(&config, target)?;
    debug!(
        "Planned {} candidate(s) in {}",
        plan.files.len(),
        plan.source_dir.display()
    );

    if plan.target.is_directory() && !args.assume_yes && !confirm_batch(&plan, input, output)? {
        writeln!(output, "Aborted; nothing was changed.")?;
        return Ok(None);
    }

    ensure_dependencies(runner, &config, &plan)?;

    let event_log = EventLog::new(&plan.source_dir, &config.log_file_name);
    info!("Appending outcomes to {}", event_log.path().display());
    let summary = execute_batch(runner, clock, &config, &plan, &event_log)?;

    print_summary(&summary, output)?;
    Ok(Some(summary))
}

/// Entry point used by the binary: real processes, real clock, stdin/stdout.
pub fn run_convert(args: &Cli) -> CliResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_convert_with(&StdCommandRunner, &SystemClock, args, &mut input, &mut output)?;
    Ok(())
}

fn print_summary<W: Write>(summary: &RunSummary, output: &mut W) -> io::Result<()> {
    writeln!(output)?;
    writeln!(
        output,
        "{} {}",
        style("Run started:").bold(),
        format_log_timestamp(&summary.started_at)
    )?;
    writeln!(
        output,
        "{} {}",
        style("Run finished:").bold(),
        format_log_timestamp(&summary.finished_at)
    )?;
    writeln!(
        output,
        "{} {} file(s) in {}",
        style("Processed:").bold(),
        summary.files_processed,
        summary.elapsed_display()
    )?;

    for outcome in Outcome::ALL {
        let count = summary.count(outcome);
        if count > 0 {
            writeln!(output, "  {outcome:<22} {count}")?;
        }
    }
    Ok(())
}
