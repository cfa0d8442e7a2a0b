// ============================================================================
// hevcify-core/src/event_log.rs
// ============================================================================
//
// AUDIT LOG: Append-only per-directory event log
//
// Every labelled outcome becomes one line in `<source>/HEVC.log`:
//
//     [2024-01-01 12:00:00] SUCCESSFULLY CONVERTED (movie.avi)
//
// The same line is echoed to the console. Console output is best effort;
// a failed append to the log file is fatal because the run can no longer
// guarantee its audit trail.

use crate::error::{CoreError, CoreResult};
use crate::processing::outcome::Outcome;
use crate::utils::format_log_timestamp;

use chrono::{DateTime, Local};
use console::{Term, style};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One audit log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub timestamp: DateTime<Local>,
    pub subject: String,
    pub outcome: Outcome,
}

impl LogEvent {
    pub fn new(timestamp: DateTime<Local>, subject: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            timestamp,
            subject: subject.into(),
            outcome,
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({})",
            format_log_timestamp(&self.timestamp),
            self.outcome.label().unwrap_or_default(),
            self.subject
        )
    }
}

/// Writer for the audit log of one source directory.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
    echo_to_console: bool,
}

impl EventLog {
    /// Log at `directory/log_file_name`. The file is created on first write.
    pub fn new(directory: &Path, log_file_name: &str) -> Self {
        Self {
            path: directory.join(log_file_name),
            echo_to_console: true,
        }
    }

    /// Disables the console mirror (the file is still written).
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.echo_to_console = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `event` to the log file and echoes it to the console.
    ///
    /// Silent outcomes are skipped.
    pub fn record(&self, event: &LogEvent) -> CoreResult<()> {
        if event.outcome.label().is_none() {
            return Ok(());
        }
        let line = event.to_string();

        if self.echo_to_console {
            let styled = if event.outcome.is_failure() {
                style(&line).yellow().to_string()
            } else if event.outcome == Outcome::RejectedUnsupported {
                style(&line).dim().to_string()
            } else {
                style(&line).green().to_string()
            };
            let _ = Term::stdout().write_line(&styled);
        }

        self.append_line(&line).map_err(|source| {
            log::error!("Failed to append to {}: {}", self.path.display(), source);
            CoreError::LogWrite {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Convenience wrapper building the event in place.
    pub fn record_outcome(
        &self,
        timestamp: DateTime<Local>,
        subject: &str,
        outcome: Outcome,
    ) -> CoreResult<()> {
        self.record(&LogEvent::new(timestamp, subject, outcome))
    }

    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")?;
        file.flush()
    }
}
