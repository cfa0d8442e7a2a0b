//! Core library for normalising a directory of media files to HEVC.
//!
//! For every candidate file the conversion engine decides whether it is
//! already encoded (move it), needs a transcode (run ffmpeg, archive the
//! original) or cannot be handled, and the batch runner records each
//! outcome in an append-only `HEVC.log` next to the files.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use hevcify_core::{CoreConfig, SystemClock, run_batch, resolve_target};
//! use hevcify_core::external::StdCommandRunner;
//! use std::path::Path;
//!
//! let config = CoreConfig::default();
//! let target = resolve_target(Path::new("/path/to/videos")).unwrap();
//!
//! let summary = run_batch(&StdCommandRunner, &SystemClock, &config, target).unwrap();
//! println!("Done in {}", summary.elapsed_display());
//! ```

pub mod clock;
pub mod config;
pub mod destination;
pub mod discovery;
pub mod error;
pub mod event_log;
pub mod external;
pub mod processing;
pub mod utils;

// Re-exports for public API
pub use clock::{Clock, SystemClock};
pub use config::CoreConfig;
pub use destination::{Directories, ensure, resolve_directories};
pub use discovery::{Target, find_candidate_files, resolve_target};
pub use error::{CoreError, CoreResult};
pub use event_log::{EventLog, LogEvent};
pub use processing::{
    BatchPlan, FileOutcome, Outcome, RunSummary, convert_file, execute_batch, plan_batch,
    run_batch,
};
pub use utils::{format_elapsed, format_log_timestamp};
