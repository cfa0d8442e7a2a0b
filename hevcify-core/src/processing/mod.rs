//! Core conversion logic and orchestration.
//!
//! This module organises the per-file conversion engine, its outcome types
//! and the batch runner that drives it over a target.

/// Per-file decision pipeline
pub mod conversion;

/// Outcome and FileOutcome types shared by the engine, logger and timer
pub mod outcome;

/// Planning and executing a run over a target
pub mod batch;

pub use batch::{BatchPlan, RunSummary, execute_batch, plan_batch, run_batch};
pub use conversion::convert_file;
pub use outcome::{FileOutcome, Outcome};
