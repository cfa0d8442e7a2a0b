// hevcify-core/tests/batch_tests.rs

use hevcify_core::config::CoreConfig;
use hevcify_core::discovery::Target;
use hevcify_core::event_log::EventLog;
use hevcify_core::external::mocks::{MockClock, MockCommandRunner};
use hevcify_core::processing::{Outcome, execute_batch, plan_batch};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn create_dummy_file(dir: &Path, filename: &str) {
    fs::write(dir.join(filename), filename.as_bytes()).expect("Failed to create dummy file");
}

fn log_lines(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("HEVC.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_mixed_directory_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let source = tempdir()?;
    create_dummy_file(source.path(), "a.mp4");
    create_dummy_file(source.path(), "b.mkv");
    create_dummy_file(source.path(), "c.txt");

    let runner = MockCommandRunner::new();
    runner.expect_probe_codec("a.mp4", "h264");
    runner.expect_success("ffmpeg", "a.mp4", "", true);
    runner.expect_probe_codec("b.mkv", "hevc");

    let config = CoreConfig::default();
    let plan = plan_batch(&config, Target::Directory(source.path().to_path_buf()))?;
    let event_log = EventLog::new(source.path(), &config.log_file_name).quiet();
    let summary = execute_batch(&runner, &MockClock::stepping(1), &config, &plan, &event_log)?;

    let hevc = source.path().join("hevc");
    let archive = source.path().join("archive");
    assert!(hevc.join("a.mp4").exists(), "re-encoded copy of a.mp4");
    assert_eq!(fs::read(archive.join("a.mp4"))?, b"a.mp4", "original a.mp4 archived");
    assert_eq!(fs::read(hevc.join("b.mkv"))?, b"b.mkv", "b.mkv moved unmodified");
    assert!(source.path().join("c.txt").exists());
    assert!(!source.path().join("a.mp4").exists());
    assert!(!source.path().join("b.mkv").exists());

    let lines = log_lines(source.path());
    assert_eq!(lines.len(), 3, "log: {lines:?}");
    assert!(lines[0].ends_with("] SUCCESSFULLY CONVERTED (a.mp4)"));
    assert!(lines[1].ends_with("] ALREADY HEVC, MOVED (b.mkv)"));
    assert!(lines[2].ends_with("] CANNOT CONVERT (c.txt)"));
    assert!(!lines.iter().any(|l| l.contains("HEVC.log")));

    assert_eq!(runner.calls_to("ffmpeg"), 1);
    assert_eq!(runner.pending_expectations(), 0);
    assert_eq!(summary.count(Outcome::Converted), 1);
    assert_eq!(summary.count(Outcome::Moved), 1);
    assert_eq!(summary.count(Outcome::RejectedUnsupported), 1);
    Ok(())
}

#[test]
fn test_second_run_does_not_reprocess() -> Result<(), Box<dyn std::error::Error>> {
    let source = tempdir()?;
    create_dummy_file(source.path(), "a.avi");
    create_dummy_file(source.path(), "b.mkv");

    let config = CoreConfig {
        archive_originals: false,
        ..CoreConfig::default()
    };
    let event_log = EventLog::new(source.path(), &config.log_file_name).quiet();

    // First run: a.avi is transcoded (original stays), b.mkv is moved
    let runner = MockCommandRunner::new();
    runner.expect_probe_codec("a.avi", "mpeg4");
    runner.expect_success("ffmpeg", "a.avi", "", true);
    runner.expect_probe_codec("b.mkv", "hevc");
    let plan = plan_batch(&config, Target::Directory(source.path().to_path_buf()))?;
    execute_batch(&runner, &MockClock::stepping(1), &config, &plan, &event_log)?;

    // Second run: no external calls are expected at all
    let second_runner = MockCommandRunner::new();
    let plan = plan_batch(&config, Target::Directory(source.path().to_path_buf()))?;
    let summary = execute_batch(&second_runner, &MockClock::stepping(1), &config, &plan, &event_log)?;

    assert!(second_runner.received_calls().is_empty());
    assert_eq!(summary.count(Outcome::DuplicateSkipped), 1);
    assert_eq!(summary.count(Outcome::Converted), 0);

    let lines = log_lines(source.path());
    assert_eq!(lines.len(), 3, "log: {lines:?}");
    assert!(lines[2].ends_with("] ALREADY CONVERTED (a.avi)"));
    Ok(())
}

#[test]
fn test_each_unsupported_file_logged_once() -> Result<(), Box<dyn std::error::Error>> {
    let source = tempdir()?;
    for name in ["notes.txt", "cover.jpg", "subs.srt", "HEVC.log"] {
        create_dummy_file(source.path(), name);
    }

    let runner = MockCommandRunner::new();
    let config = CoreConfig::default();
    let plan = plan_batch(&config, Target::Directory(source.path().to_path_buf()))?;
    let event_log = EventLog::new(source.path(), &config.log_file_name).quiet();
    let summary = execute_batch(&runner, &MockClock::stepping(1), &config, &plan, &event_log)?;

    assert_eq!(summary.count(Outcome::RejectedUnsupported), 3);
    assert_eq!(summary.count(Outcome::Ignored), 1);

    // The pre-existing HEVC.log content was just its own name
    let lines = log_lines(source.path());
    let rejected: Vec<_> = lines.iter().filter(|l| l.contains("CANNOT CONVERT")).collect();
    assert_eq!(rejected.len(), 3);
    for name in ["notes.txt", "cover.jpg", "subs.srt"] {
        assert_eq!(lines.iter().filter(|l| l.contains(&format!("({name})"))).count(), 1);
    }
    Ok(())
}

#[test]
fn test_failures_do_not_stop_the_batch() -> Result<(), Box<dyn std::error::Error>> {
    let source = tempdir()?;
    create_dummy_file(source.path(), "a.mkv");
    create_dummy_file(source.path(), "b.mkv");

    let runner = MockCommandRunner::new();
    runner.expect_exit_error("ffprobe", "a.mkv", 1);
    runner.expect_partial_failure("ffmpeg", "a.mkv", 1);
    runner.expect_probe_codec("b.mkv", "h264");
    runner.expect_success("ffmpeg", "b.mkv", "", true);

    let config = CoreConfig::default();
    let plan = plan_batch(&config, Target::Directory(source.path().to_path_buf()))?;
    let event_log = EventLog::new(source.path(), &config.log_file_name).quiet();
    let summary = execute_batch(&runner, &MockClock::stepping(1), &config, &plan, &event_log)?;

    assert_eq!(summary.count(Outcome::ConvertFailed), 1);
    assert_eq!(summary.count(Outcome::Converted), 1);
    assert!(!source.path().join("hevc").join("a.mp4").exists());
    assert!(source.path().join("a.mkv").exists());

    let lines = log_lines(source.path());
    assert_eq!(lines.len(), 3, "log: {lines:?}");
    assert!(lines[0].ends_with("] PROBE FAILED (a.mkv)"));
    assert!(lines[1].ends_with("] CONVERSION FAILED FOR (a.mkv)"));
    assert!(lines[2].ends_with("] SUCCESSFULLY CONVERTED (b.mkv)"));
    Ok(())
}

#[test]
fn test_single_file_target() -> Result<(), Box<dyn std::error::Error>> {
    let source = tempdir()?;
    create_dummy_file(source.path(), "only.mov");
    create_dummy_file(source.path(), "other.mkv");

    let runner = MockCommandRunner::new();
    runner.expect_probe_codec("only.mov", "hevc");

    let config = CoreConfig::default();
    let plan = plan_batch(&config, Target::File(source.path().join("only.mov")))?;
    assert_eq!(plan.files.len(), 1);

    let event_log = EventLog::new(source.path(), &config.log_file_name).quiet();
    execute_batch(&runner, &MockClock::stepping(1), &config, &plan, &event_log)?;

    assert!(source.path().join("hevc").join("only.mov").exists());
    assert!(source.path().join("other.mkv").exists());
    assert_eq!(log_lines(source.path()).len(), 1);
    Ok(())
}

#[test]
fn test_missing_source_directory_is_fatal() {
    let source = tempdir().unwrap();
    let gone = source.path().join("gone");

    let config = CoreConfig::default();
    let plan = plan_batch(&config, Target::File(gone.join("a.mkv"))).unwrap();
    let event_log = EventLog::new(&plan.source_dir, &config.log_file_name).quiet();
    let runner = MockCommandRunner::new();

    let err = execute_batch(&runner, &MockClock::stepping(1), &config, &plan, &event_log).unwrap_err();
    assert!(err.is_fatal());
    assert!(!gone.exists());
}
