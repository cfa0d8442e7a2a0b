// hevcify-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---
// This module is only compiled for this crate's own unit tests or when the
// "test-mocks" feature is enabled.
#![cfg(any(test, feature = "test-mocks"))]

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::external::{CommandOutput, CommandRunner};
use chrono::{DateTime, Duration as ChronoDuration, Local, TimeZone};
use std::cell::{Cell, RefCell};
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// What a scripted command does when matched.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Exit 0 with the given stdout
    Success(String),
    /// Exit with the given non-zero code
    ExitError(i32),
    /// The process could not be started
    SpawnError,
}

/// Represents an expected command call and its mock result.
pub struct MockExpectation {
    pub program: String,
    pub arg_pattern: String,
    pub response: MockResponse,
    /// Create an empty file at the last argument before responding
    pub create_dummy_output: bool,
}

/// A call the mock received, arguments rendered lossily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedCall {
    pub program: String,
    pub args: Vec<String>,
}

/// Mock implementation of CommandRunner supporting multiple expectations.
///
/// Each expectation is consumed by the first call whose program matches and
/// one of whose arguments contains the pattern. An unmatched call panics.
#[derive(Clone, Default)]
pub struct MockCommandRunner {
    expectations: Rc<RefCell<Vec<MockExpectation>>>,
    received_calls: Rc<RefCell<Vec<ReceivedCall>>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        program: &str,
        arg_pattern: &str,
        response: MockResponse,
        create_dummy_output: bool,
    ) {
        self.expectations.borrow_mut().push(MockExpectation {
            program: program.to_string(),
            arg_pattern: arg_pattern.to_string(),
            response,
            create_dummy_output,
        });
    }

    pub fn expect_success(&self, program: &str, arg_pattern: &str, stdout: &str, create_dummy_output: bool) {
        self.add_expectation(program, arg_pattern, MockResponse::Success(stdout.to_string()), create_dummy_output);
    }

    pub fn expect_exit_error(&self, program: &str, arg_pattern: &str, exit_code: i32) {
        self.add_expectation(program, arg_pattern, MockResponse::ExitError(exit_code), false);
    }

    /// Fails with `exit_code` after leaving a truncated file at the output path.
    pub fn expect_partial_failure(&self, program: &str, arg_pattern: &str, exit_code: i32) {
        self.add_expectation(program, arg_pattern, MockResponse::ExitError(exit_code), true);
    }

    pub fn expect_spawn_error(&self, program: &str, arg_pattern: &str) {
        self.add_expectation(program, arg_pattern, MockResponse::SpawnError, false);
    }

    /// Convenience: ffprobe reporting a single video stream with `codec`.
    pub fn expect_probe_codec(&self, arg_pattern: &str, codec: &str) {
        let json = format!(
            r#"{{"streams":[{{"index":0,"codec_name":"{codec}"}},{{"index":1,"codec_name":"aac"}}]}}"#
        );
        self.expect_success("ffprobe", arg_pattern, &json, false);
    }

    pub fn received_calls(&self) -> Vec<ReceivedCall> {
        self.received_calls.borrow().clone()
    }

    /// Number of recorded calls to `program`.
    pub fn calls_to(&self, program: &str) -> usize {
        self.received_calls
            .borrow()
            .iter()
            .filter(|call| call.program == program)
            .count()
    }

    pub fn pending_expectations(&self) -> usize {
        self.expectations.borrow().len()
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, program: &str, args: &[OsString]) -> CoreResult<CommandOutput> {
        let args: Vec<String> = args.iter().map(|s| s.to_string_lossy().into_owned()).collect();
        self.received_calls.borrow_mut().push(ReceivedCall {
            program: program.to_string(),
            args: args.clone(),
        });

        let mut expectations = self.expectations.borrow_mut();
        let found_index = expectations.iter().position(|exp| {
            exp.program == program && args.iter().any(|arg| arg.contains(&exp.arg_pattern))
        });

        let Some(index) = found_index else {
            log::error!("MockCommandRunner: No expectation found for {} {:?}", program, args);
            panic!("MockCommandRunner: No expectation found for {program} {args:?}");
        };
        let expectation = expectations.remove(index);
        log::info!(
            "MockCommandRunner: Matched expectation '{}' / '{}'",
            expectation.program,
            expectation.arg_pattern
        );

        if expectation.create_dummy_output {
            if let Some(output_path) = args.last().map(PathBuf::from) {
                if let Err(e) = std::fs::write(&output_path, b"partial") {
                    log::error!("MockCommandRunner failed to create dummy output {:?}: {}", output_path, e);
                }
            }
        }

        match expectation.response {
            MockResponse::Success(stdout) => Ok(CommandOutput { stdout, exit_code: 0 }),
            MockResponse::ExitError(exit_code) => Err(CoreError::CommandFailed {
                command: program.to_string(),
                exit_code,
                stderr: "mock failure".to_string(),
            }),
            MockResponse::SpawnError => Err(CoreError::CommandStart(
                program.to_string(),
                io::Error::new(io::ErrorKind::PermissionDenied, "mock spawn error"),
            )),
        }
    }
}

/// Clock that starts at a fixed instant and advances by `step` on every read.
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Cell<DateTime<Local>>,
    step: ChronoDuration,
}

impl MockClock {
    pub fn new(start: DateTime<Local>, step: ChronoDuration) -> Self {
        Self {
            current: Cell::new(start),
            step,
        }
    }

    /// Starts at 2024-01-01 12:00:00 local time, advancing `step_secs` per read.
    pub fn stepping(step_secs: i64) -> Self {
        let start = Local
            .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(Local::now);
        Self::new(start, ChronoDuration::seconds(step_secs))
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Local> {
        let now = self.current.get();
        self.current.set(now + self.step);
        now
    }
}
