// ============================================================================
// hevcify-core/src/destination.rs
// ============================================================================
//
// DESTINATION RESOLVER: Output and archive directories under the source
//
// Encoded outputs and archived originals live in subdirectories of the
// source directory. They are created on demand and reused when present.
// Failing to create one is fatal: the run has nowhere to put its work.

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The (source, encoded-output, archive) triple for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directories {
    pub source: PathBuf,
    pub output: PathBuf,
    /// `None` when archiving is disabled
    pub archive: Option<PathBuf>,
}

/// Ensures `source_dir/name` exists as a directory and returns its path.
///
/// An existing directory (including one created concurrently by someone
/// else) is success. A missing `source_dir` is a `DestinationCreation`
/// error.
pub fn ensure(source_dir: &Path, name: &str) -> CoreResult<PathBuf> {
    let destination = source_dir.join(name);
    if destination.is_dir() {
        return Ok(destination);
    }

    match fs::create_dir(&destination) {
        Ok(()) => {
            log::debug!("Created directory {}", destination.display());
            Ok(destination)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && destination.is_dir() => {
            Ok(destination)
        }
        Err(source) => {
            log::error!("Unable to create destination directory {}: {}", destination.display(), source);
            Err(CoreError::DestinationCreation {
                path: destination,
                source,
            })
        }
    }
}

/// Resolves and creates the destination directories for `source_dir`.
pub fn resolve_directories(source_dir: &Path, config: &CoreConfig) -> CoreResult<Directories> {
    let output = ensure(source_dir, &config.output_dir_name)?;
    let archive = if config.archive_originals {
        Some(ensure(source_dir, &config.archive_dir_name)?)
    } else {
        None
    };

    Ok(Directories {
        source: source_dir.to_path_buf(),
        output,
        archive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_creates_then_reuses() {
        let dir = tempdir().unwrap();
        let first = ensure(dir.path(), "hevc").unwrap();
        assert!(first.is_dir());

        fs::write(first.join("kept.mp4"), b"x").unwrap();
        let second = ensure(dir.path(), "hevc").unwrap();
        assert_eq!(first, second);
        assert!(second.join("kept.mp4").exists());
    }

    #[test]
    fn test_ensure_missing_parent_is_fatal() {
        let dir = tempdir().unwrap();
        let vanished = dir.path().join("gone");
        let err = ensure(&vanished, "hevc").unwrap_err();
        assert!(matches!(err, CoreError::DestinationCreation { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_ensure_file_in_the_way() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hevc"), b"not a dir").unwrap();
        assert!(ensure(dir.path(), "hevc").is_err());
    }

    #[test]
    fn test_resolve_directories_without_archive() {
        let dir = tempdir().unwrap();
        let config = CoreConfig {
            archive_originals: false,
            ..CoreConfig::default()
        };
        let dirs = resolve_directories(dir.path(), &config).unwrap();
        assert_eq!(dirs.output, dir.path().join("hevc"));
        assert!(dirs.archive.is_none());
        assert!(!dir.path().join("archive").exists());
    }

    #[test]
    fn test_resolve_directories_with_archive() {
        let dir = tempdir().unwrap();
        let dirs = resolve_directories(dir.path(), &CoreConfig::default()).unwrap();
        assert_eq!(dirs.archive, Some(dir.path().join("archive")));
        assert!(dir.path().join("archive").is_dir());
    }
}
