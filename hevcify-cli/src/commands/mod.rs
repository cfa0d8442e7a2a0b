//! Command implementations for the CLI.

/// Module containing the implementation of the convert run: target
/// resolution, confirmation, dependency check and the batch itself.
pub mod convert;
