//! Writing rendered files to disk.

use crate::error::{Error, Result};
use cicd_pipeline::RenderedFile;
use std::path::{Component, Path, PathBuf};

/// Result for a single generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    /// Repository-relative path
    pub path: PathBuf,
    /// The status of the file operation.
    pub status: FileStatus,
}

/// Status of a file operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// File was newly created.
    Created,
    /// File existed and was updated with new content.
    Updated,
    /// File existed and content was unchanged.
    Unchanged,
    /// Would be created (dry-run mode).
    WouldCreate,
    /// Would be updated (dry-run mode).
    WouldUpdate,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Updated => write!(f, "Updated"),
            Self::Unchanged => write!(f, "Unchanged"),
            Self::WouldCreate => write!(f, "Would create"),
            Self::WouldUpdate => write!(f, "Would update"),
        }
    }
}

/// Write rendered files below `root`, creating parent directories.
///
/// With `dry_run` nothing is written and the would-be status is reported.
///
/// # Errors
///
/// Returns [`Error::UnsafePath`] if a path is absolute or climbs out of
/// `root`, and [`Error::Io`] if reading or writing fails. Paths are checked
/// before anything is written.
pub fn write_files(root: &Path, files: &[RenderedFile], dry_run: bool) -> Result<Vec<FileResult>> {
    for file in files {
        validate_path(&file.path)?;
    }

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let target = root.join(&file.path);
        let status = if dry_run {
            match read_existing(&target)? {
                Some(existing) if existing == file.content => FileStatus::Unchanged,
                Some(_) => FileStatus::WouldUpdate,
                None => FileStatus::WouldCreate,
            }
        } else {
            write_file(&target, &file.content)?
        };

        tracing::info!(
            path = %file.path.display(),
            status = %status,
            "Processed generated file"
        );

        results.push(FileResult {
            path: file.path.clone(),
            status,
        });
    }

    Ok(results)
}

/// Paths of rendered files that are missing or differ on disk.
///
/// # Errors
///
/// Returns [`Error::UnsafePath`] for paths outside `root` and [`Error::Io`]
/// if an existing file cannot be read.
pub fn check_files(root: &Path, files: &[RenderedFile]) -> Result<Vec<PathBuf>> {
    let mut stale = Vec::new();
    for file in files {
        validate_path(&file.path)?;
        let current = read_existing(&root.join(&file.path))?;
        if current.as_deref() != Some(file.content.as_str()) {
            tracing::debug!(path = %file.path.display(), "Generated file is out of date");
            stale.push(file.path.clone());
        }
    }
    Ok(stale)
}

/// Generated paths must stay relative and below the output root.
fn validate_path(path: &Path) -> Result<()> {
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if escapes {
        return Err(Error::UnsafePath {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn read_existing(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Write a file and return the status.
fn write_file(path: &Path, content: &str) -> Result<FileStatus> {
    let status = match read_existing(path)? {
        Some(existing) if existing == content => return Ok(FileStatus::Unchanged),
        Some(_) => FileStatus::Updated,
        None => FileStatus::Created,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::io(path, e))?;
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file(path: &str, content: &str) -> RenderedFile {
        RenderedFile::new(path, content)
    }

    #[test]
    fn test_file_status_display() {
        assert_eq!(FileStatus::Created.to_string(), "Created");
        assert_eq!(FileStatus::Updated.to_string(), "Updated");
        assert_eq!(FileStatus::Unchanged.to_string(), "Unchanged");
        assert_eq!(FileStatus::WouldCreate.to_string(), "Would create");
        assert_eq!(FileStatus::WouldUpdate.to_string(), "Would update");
    }

    #[test]
    fn test_create_update_unchanged() {
        let dir = TempDir::new().unwrap();
        let files = [file(".github/workflows/ci.yml", "a: 1\n")];

        let created = write_files(dir.path(), &files, false).unwrap();
        assert_eq!(created[0].status, FileStatus::Created);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".github/workflows/ci.yml")).unwrap(),
            "a: 1\n"
        );

        let unchanged = write_files(dir.path(), &files, false).unwrap();
        assert_eq!(unchanged[0].status, FileStatus::Unchanged);

        let changed = [file(".github/workflows/ci.yml", "a: 2\n")];
        let updated = write_files(dir.path(), &changed, false).unwrap();
        assert_eq!(updated[0].status, FileStatus::Updated);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let files = [file(".gitlab-ci.yml", "include: []\n")];

        let results = write_files(dir.path(), &files, true).unwrap();
        assert_eq!(results[0].status, FileStatus::WouldCreate);
        assert!(!dir.path().join(".gitlab-ci.yml").exists());

        std::fs::write(dir.path().join(".gitlab-ci.yml"), "old\n").unwrap();
        let results = write_files(dir.path(), &files, true).unwrap();
        assert_eq!(results[0].status, FileStatus::WouldUpdate);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".gitlab-ci.yml")).unwrap(),
            "old\n"
        );
    }

    #[test]
    fn test_parent_directory_paths_rejected() {
        let dir = TempDir::new().unwrap();
        let files = [
            file(".github/workflows/ok.yml", "ok\n"),
            file(".github/workflows/../../escape.yml", "bad\n"),
        ];

        let err = write_files(dir.path(), &files, false).unwrap_err();
        assert!(matches!(err, Error::UnsafePath { .. }));
        assert!(!dir.path().join(".github").exists());
    }

    #[test]
    fn test_check_reports_missing_and_stale() {
        let dir = TempDir::new().unwrap();
        let files = [file("a.yml", "a\n"), file("b.yml", "b\n"), file("c.yml", "c\n")];
        std::fs::write(dir.path().join("a.yml"), "a\n").unwrap();
        std::fs::write(dir.path().join("b.yml"), "old\n").unwrap();

        let stale = check_files(dir.path(), &files).unwrap();
        assert_eq!(stale, vec![PathBuf::from("b.yml"), PathBuf::from("c.yml")]);
    }
}
