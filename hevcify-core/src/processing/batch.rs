// ============================================================================
// hevcify-core/src/processing/batch.rs
// ============================================================================
//
// BATCH RUNNER: Drives the conversion engine over a target
//
// WORKFLOW:
// 1. plan_batch: resolve the target into its source dir and candidates
//    (the CLI confirms directory runs between planning and execution)
// 2. execute_batch: create the destination dirs, convert each candidate
//    in order, append every event to the audit log, tally outcomes
// 3. Return a RunSummary timed from the run start to the last completion

// ---- Internal crate imports ----
use crate::clock::Clock;
use crate::config::CoreConfig;
use crate::destination::{Directories, resolve_directories};
use crate::discovery::{Target, find_candidate_files};
use crate::error::CoreResult;
use crate::event_log::EventLog;
use crate::external::CommandRunner;
use crate::processing::conversion::convert_file;
use crate::processing::outcome::Outcome;
use crate::utils::{extension_lowercase, format_elapsed};

// ---- External crate imports ----
use chrono::{DateTime, Local};
use log::info;

// ---- Standard library imports ----
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Candidates for one run. Nothing on disk has been touched yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub target: Target,
    pub source_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

impl BatchPlan {
    /// Whether any candidate carries a recognised media extension, i.e.
    /// whether the run will need ffprobe/ffmpeg at all.
    #[must_use]
    pub fn has_media(&self, config: &CoreConfig) -> bool {
        self.files.iter().any(|file| {
            extension_lowercase(file).is_some_and(|ext| config.is_media_extension(&ext))
        })
    }
}

/// Timing and tallies for a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub directories: Directories,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    /// Terminal outcome per processed file, by outcome name
    pub counts: BTreeMap<String, usize>,
    pub files_processed: usize,
}

impl RunSummary {
    /// Wall-clock time between start and the last completion.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        (self.finished_at - self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Human-readable elapsed time ("1 minutes, 30 seconds").
    #[must_use]
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed())
    }

    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.counts.get(&outcome.to_string()).copied().unwrap_or(0)
    }
}

/// Resolves `target` into a plan without touching the file system.
pub fn plan_batch(config: &CoreConfig, target: Target) -> CoreResult<BatchPlan> {
    config.validate()?;

    let source_dir = target.source_dir()?;
    let files = match &target {
        Target::File(file) => vec![file.clone()],
        Target::Directory(dir) => find_candidate_files(dir)?,
    };

    Ok(BatchPlan {
        target,
        source_dir,
        files,
    })
}

/// Creates the destination directories and converts every file in `plan`,
/// strictly in order.
///
/// Per-file failures are logged outcomes. Only destination creation and
/// audit log write failures stop the run.
pub fn execute_batch<R: CommandRunner, C: Clock>(
    runner: &R,
    clock: &C,
    config: &CoreConfig,
    plan: &BatchPlan,
    event_log: &EventLog,
) -> CoreResult<RunSummary> {
    let started_at = clock.now();
    let directories = resolve_directories(&plan.source_dir, config)?;
    let mut finished_at = started_at;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for (index, input_path) in plan.files.iter().enumerate() {
        log::debug!("[{}/{}] {}", index + 1, plan.files.len(), input_path.display());

        let report = convert_file(runner, clock, config, &directories, input_path);
        for event in &report.events {
            event_log.record(event)?;
        }

        *counts.entry(report.outcome.to_string()).or_default() += 1;
        finished_at = report.completed_at;
    }

    let summary = RunSummary {
        directories,
        started_at,
        finished_at,
        counts,
        files_processed: plan.files.len(),
    };
    info!(
        "Processed {} file(s) in {}",
        summary.files_processed,
        summary.elapsed_display()
    );
    Ok(summary)
}

/// Plans and executes a run without confirmation.
pub fn run_batch<R: CommandRunner, C: Clock>(
    runner: &R,
    clock: &C,
    config: &CoreConfig,
    target: Target,
) -> CoreResult<RunSummary> {
    let plan = plan_batch(config, target)?;
    let event_log = EventLog::new(&plan.source_dir, &config.log_file_name);
    execute_batch(runner, clock, config, &plan, &event_log)
}
