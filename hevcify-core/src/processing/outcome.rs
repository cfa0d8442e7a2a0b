//! Per-file outcomes of the conversion engine.

use crate::event_log::LogEvent;
use chrono::{DateTime, Local};
use std::fmt;

/// What happened to one candidate file.
///
/// Every variant except `ProbeFailed` is terminal. `ProbeFailed` is logged
/// on the way to a transcode and never ends processing on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Output already present from an earlier run
    DuplicateSkipped,
    /// Already in the target codec, relocated unmodified
    Moved,
    Converted,
    /// Already in the target codec but could not be relocated
    MoveFailed,
    ProbeFailed,
    ConvertFailed,
    /// Output produced, original could not be archived
    ArchiveFailed,
    RejectedUnsupported,
    RejectedMissing,
    /// The engine's own artifacts, or a vanished non-media file; never logged
    Ignored,
}

impl Outcome {
    pub const ALL: [Outcome; 10] = [
        Outcome::DuplicateSkipped,
        Outcome::Moved,
        Outcome::Converted,
        Outcome::MoveFailed,
        Outcome::ProbeFailed,
        Outcome::ConvertFailed,
        Outcome::ArchiveFailed,
        Outcome::RejectedUnsupported,
        Outcome::RejectedMissing,
        Outcome::Ignored,
    ];

    /// Label written to the audit log, `None` for silent outcomes.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            Outcome::DuplicateSkipped => Some("ALREADY CONVERTED"),
            Outcome::Moved => Some("ALREADY HEVC, MOVED"),
            Outcome::Converted => Some("SUCCESSFULLY CONVERTED"),
            Outcome::MoveFailed => Some("MOVE FAILED"),
            Outcome::ProbeFailed => Some("PROBE FAILED"),
            Outcome::ConvertFailed => Some("CONVERSION FAILED FOR"),
            Outcome::ArchiveFailed => Some("ARCHIVE FAILED"),
            Outcome::RejectedUnsupported => Some("CANNOT CONVERT"),
            Outcome::RejectedMissing => Some("FILE NOT FOUND"),
            Outcome::Ignored => None,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Outcome::ProbeFailed
    }

    /// Failures worth a warning on the diagnostic log.
    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Outcome::MoveFailed
                | Outcome::ProbeFailed
                | Outcome::ConvertFailed
                | Outcome::ArchiveFailed
                | Outcome::RejectedMissing
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::DuplicateSkipped => "duplicate-skipped",
            Outcome::Moved => "moved",
            Outcome::Converted => "converted",
            Outcome::MoveFailed => "move-failed",
            Outcome::ProbeFailed => "probe-failed",
            Outcome::ConvertFailed => "convert-failed",
            Outcome::ArchiveFailed => "archive-failed",
            Outcome::RejectedUnsupported => "rejected-unsupported",
            Outcome::RejectedMissing => "rejected-missing",
            Outcome::Ignored => "ignored",
        };
        f.pad(name)
    }
}

/// Result of running the engine over one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// File name the events refer to
    pub subject: String,
    pub outcome: Outcome,
    pub completed_at: DateTime<Local>,
    /// Events to append to the audit log, in order; the last one carries
    /// `outcome` unless it is silent
    pub events: Vec<LogEvent>,
}

impl FileOutcome {
    pub(crate) fn new(subject: String) -> FileOutcomeBuilder {
        FileOutcomeBuilder {
            subject,
            events: Vec::new(),
        }
    }
}

/// Collects intermediate events until the terminal outcome is known.
#[derive(Debug)]
pub(crate) struct FileOutcomeBuilder {
    subject: String,
    events: Vec<LogEvent>,
}

impl FileOutcomeBuilder {
    /// Records a non-terminal event.
    pub(crate) fn note(&mut self, outcome: Outcome, at: DateTime<Local>) {
        debug_assert!(!outcome.is_terminal());
        self.events.push(LogEvent::new(at, self.subject.clone(), outcome));
    }

    pub(crate) fn finish(mut self, outcome: Outcome, completed_at: DateTime<Local>) -> FileOutcome {
        if outcome.label().is_some() {
            self.events
                .push(LogEvent::new(completed_at, self.subject.clone(), outcome));
        }
        FileOutcome {
            subject: self.subject,
            outcome,
            completed_at,
            events: self.events,
        }
    }
}
