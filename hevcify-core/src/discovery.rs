//! Target resolution and candidate file discovery.
//!
//! A run targets either a single file or a directory. Directory targets are
//! scanned at the top level only; every regular file is a candidate, media
//! or not, so the conversion engine can report on what it refuses.

use crate::error::{CoreError, CoreResult};

use std::fs;
use std::path::{Path, PathBuf};

/// What the user pointed the tool at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single file; its parent is the source directory
    File(PathBuf),
    Directory(PathBuf),
}

impl Target {
    /// Directory that holds the log file and destination directories.
    pub fn source_dir(&self) -> CoreResult<PathBuf> {
        match self {
            Target::Directory(dir) => Ok(dir.clone()),
            Target::File(file) => file
                .parent()
                .map(|p| {
                    if p.as_os_str().is_empty() {
                        PathBuf::from(".")
                    } else {
                        p.to_path_buf()
                    }
                })
                .ok_or_else(|| {
                    CoreError::PathError(format!(
                        "Could not determine parent directory for file '{}'",
                        file.display()
                    ))
                }),
        }
    }

    #[must_use]
    pub fn is_directory(&self) -> bool {
        matches!(self, Target::Directory(_))
    }
}

/// Classifies `path` as a file or directory target.
///
/// A path that does not exist, or is neither a regular file nor a
/// directory, is an invalid invocation.
pub fn resolve_target(path: &Path) -> CoreResult<Target> {
    let metadata = fs::metadata(path).map_err(|e| {
        CoreError::InvalidTarget(format!("File or directory not found '{}': {}", path.display(), e))
    })?;

    if metadata.is_dir() {
        Ok(Target::Directory(path.to_path_buf()))
    } else if metadata.is_file() {
        Ok(Target::File(path.to_path_buf()))
    } else {
        Err(CoreError::InvalidTarget(format!(
            "Input path '{}' is neither a file nor a directory",
            path.display()
        )))
    }
}

/// Lists the regular files at the top level of `input_dir`, sorted by name.
///
/// Unreadable entries are skipped with a warning; an unreadable directory is
/// an error.
pub fn find_candidate_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read entry in {}: {}", input_dir.display(), e);
                    return None;
                }
            };
            let path = entry.path();
            path.is_file().then_some(path)
        })
        .collect();

    files.sort();
    log::debug!("Found {} candidate file(s) in {}", files.len(), input_dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_target_kinds() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.mkv");
        fs::write(&file, b"x").unwrap();

        assert_eq!(resolve_target(dir.path()).unwrap(), Target::Directory(dir.path().to_path_buf()));
        assert_eq!(resolve_target(&file).unwrap(), Target::File(file.clone()));

        let err = resolve_target(&dir.path().join("nope.mkv")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTarget(_)));
    }

    #[test]
    fn test_source_dir() {
        let target = Target::File(PathBuf::from("/videos/a.mkv"));
        assert_eq!(target.source_dir().unwrap(), PathBuf::from("/videos"));

        let target = Target::File(PathBuf::from("a.mkv"));
        assert_eq!(target.source_dir().unwrap(), PathBuf::from("."));

        let target = Target::Directory(PathBuf::from("/videos"));
        assert_eq!(target.source_dir().unwrap(), PathBuf::from("/videos"));
    }

    #[test]
    fn test_find_candidate_files_top_level_sorted() {
        let dir = tempdir().unwrap();
        for name in ["c.txt", "a.mp4", "B.MKV"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("hevc")).unwrap();
        fs::write(dir.path().join("hevc").join("nested.mp4"), b"x").unwrap();

        let files = find_candidate_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["B.MKV", "a.mp4", "c.txt"]);
    }

    #[test]
    fn test_find_candidate_files_empty_dir() {
        let dir = tempdir().unwrap();
        assert!(find_candidate_files(dir.path()).unwrap().is_empty());
    }
}
