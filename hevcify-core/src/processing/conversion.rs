// ============================================================================
// hevcify-core/src/processing/conversion.rs
// ============================================================================
//
// CONVERSION ENGINE: Per-file decision and transition
//
// `convert_file` classifies one candidate and carries it to exactly one
// terminal Outcome. Rules are evaluated in order, first match wins:
//
// 1. Missing      - path vanished since enumeration
// 2. Unsupported  - extension not recognised (own artifacts are ignored)
// 3. Duplicate    - `<output>/<stem>.<output_extension>` already exists
// 4. Codec check  - already in the target codec: move into the output dir.
//                   A probe failure is noted and falls through to 5.
// 5. Transcode    - encode, then archive the original
//
// Per-file errors never escape: they become outcomes. The engine holds no
// state between calls.

// ---- Internal crate imports ----
use crate::clock::Clock;
use crate::config::CoreConfig;
use crate::destination::Directories;
use crate::error::{CoreError, CoreResult};
use crate::external::{CommandRunner, has_codec, probe_stream_codecs, run_ffmpeg_encode};
use crate::processing::outcome::{FileOutcome, Outcome};
use crate::utils::{extension_lowercase, get_filename_safe};

// ---- External crate imports ----
use log::{debug, info, warn};

// ---- Standard library imports ----
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Runs the decision pipeline for `input_path`.
///
/// Timestamps for the events and the completion time come from `clock`.
pub fn convert_file<R: CommandRunner, C: Clock>(
    runner: &R,
    clock: &C,
    config: &CoreConfig,
    dirs: &Directories,
    input_path: &Path,
) -> FileOutcome {
    let subject =
        get_filename_safe(input_path).unwrap_or_else(|_| input_path.display().to_string());
    let mut report = FileOutcome::new(subject.clone());

    let is_media = extension_lowercase(input_path)
        .is_some_and(|ext| config.is_media_extension(&ext));

    // ---- 1. Missing ----
    if !input_path.exists() {
        if is_media {
            warn!("{} no longer exists", input_path.display());
            return report.finish(Outcome::RejectedMissing, clock.now());
        }
        debug!("Ignoring vanished non-media file {}", input_path.display());
        return report.finish(Outcome::Ignored, clock.now());
    }

    // ---- 2. Unsupported ----
    if !is_media {
        if config.is_own_artifact(&subject) {
            debug!("Ignoring own artifact {}", subject);
            return report.finish(Outcome::Ignored, clock.now());
        }
        return report.finish(Outcome::RejectedUnsupported, clock.now());
    }

    // ---- 3. Duplicate ----
    let output_path = match output_path_for(config, dirs, input_path) {
        Some(path) => path,
        None => return report.finish(Outcome::RejectedUnsupported, clock.now()),
    };
    if output_path.exists() {
        info!("Output {} already exists, skipping {}", output_path.display(), subject);
        return report.finish(Outcome::DuplicateSkipped, clock.now());
    }

    info!("Processing: {}", subject);

    // ---- 4. Codec check ----
    match probe_stream_codecs(runner, &config.ffprobe_command, input_path) {
        Ok(streams) if has_codec(&streams, &config.target_codec) => {
            let destination = dirs.output.join(&subject);
            let outcome = match move_without_overwrite(input_path, &destination) {
                Ok(()) => Outcome::Moved,
                Err(e) => {
                    warn!("Could not move {} to {}: {}", subject, destination.display(), e);
                    Outcome::MoveFailed
                }
            };
            return report.finish(outcome, clock.now());
        }
        Ok(_) => debug!("{} is not {}, transcoding", subject, config.target_codec),
        Err(e) => {
            warn!("{}; transcoding anyway", e);
            report.note(Outcome::ProbeFailed, clock.now());
        }
    }

    // ---- 5. Transcode ----
    // Whatever ffmpeg's -n refused to replace is not ours to clean up
    let output_preexisted = output_path.exists();
    if let Err(e) = run_ffmpeg_encode(runner, config, input_path, &output_path) {
        warn!("ffmpeg failed for {}: {}", subject, e);
        if output_preexisted {
            debug!("Leaving {} in place; the encode did not create it", output_path.display());
        } else {
            remove_partial_output(&output_path);
        }
        return report.finish(Outcome::ConvertFailed, clock.now());
    }

    let outcome = match &dirs.archive {
        Some(archive_dir) => {
            let destination = archive_dir.join(&subject);
            match move_without_overwrite(input_path, &destination) {
                Ok(()) => Outcome::Converted,
                Err(e) => {
                    warn!("Could not archive {} to {}: {}", subject, destination.display(), e);
                    Outcome::ArchiveFailed
                }
            }
        }
        None => Outcome::Converted,
    };
    report.finish(outcome, clock.now())
}

/// Canonical transcode destination: `<output dir>/<stem>.<output_extension>`.
#[must_use]
pub fn output_path_for(config: &CoreConfig, dirs: &Directories, input_path: &Path) -> Option<PathBuf> {
    let stem = input_path.file_stem()?.to_string_lossy();
    Some(dirs.output.join(format!("{stem}.{}", config.output_extension)))
}

/// Moves `from` to `to`, refusing to replace an existing file.
///
/// Uses a rename, falling back to copy-and-delete when the two paths are on
/// different file systems.
pub fn move_without_overwrite(from: &Path, to: &Path) -> CoreResult<()> {
    if to.exists() {
        return Err(CoreError::DestinationExists(to.to_path_buf()));
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!("Cross-device move for {}, copying", from.display());
            fs::copy(from, to)?;
            if let Err(e) = fs::remove_file(from) {
                // Keep exactly one copy
                let _ = fs::remove_file(to);
                return Err(e.into());
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn remove_partial_output(output_path: &Path) {
    if !output_path.exists() {
        return;
    }
    match fs::remove_file(output_path) {
        Ok(()) => debug!("Removed partial output {}", output_path.display()),
        Err(e) => warn!("Failed to remove partial output {}: {}", output_path.display(), e),
    }
}
