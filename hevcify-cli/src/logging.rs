// ============================================================================
// hevcify-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Diagnostic logger initialisation
//
// Diagnostics go through the `log` facade with `env_logger` as the backend.
// They are separate from the audit trail in HEVC.log, which hevcify-core
// always writes.
//
// USAGE:
// - default: info
// - --verbose: debug (external command lines, per-file steps)
// - RUST_LOG, when set, takes precedence over both

use env_logger::{Builder, Env};

/// Log level used when RUST_LOG is not set.
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Initialises env_logger once for the process.
///
/// Repeated calls are ignored, which keeps integration tests that share a
/// process from panicking.
pub fn init_logging(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let _ = Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "info");
        assert_eq!(default_filter(true), "debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
    }
}
