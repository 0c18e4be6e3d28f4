//! Storage layout for downloaded files.
//!
//! The storage root is an explicit configuration value, not an implicit
//! working-directory singleton. Every stored file lives directly inside the
//! root; the fetcher writes into a per-job staging directory under
//! [`STAGING_DIR_NAME`] and the finished file is renamed into place, so
//! readers never see a partially written file.

mod error;

use std::fs;
use std::path::{Component, Path, PathBuf};

pub use error::PathError;

use crate::domain::JobId;

/// Default storage directory, relative to the working directory.
pub const DEFAULT_STORAGE_DIR: &str = "downloads";

/// Name of the staging directory inside the storage root.
pub const STAGING_DIR_NAME: &str = ".partial";

/// Resolved storage directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    /// Use `root` as the storage root, as given.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the storage root against the current working directory.
    ///
    /// `None` selects [`DEFAULT_STORAGE_DIR`]. Absolute paths are used as-is.
    pub fn resolve(root: Option<&Path>) -> Result<Self, PathError> {
        let root = root.unwrap_or_else(|| Path::new(DEFAULT_STORAGE_DIR));
        if root.as_os_str().is_empty() {
            return Err(PathError::EmptyPath);
        }
        if root.is_absolute() {
            return Ok(Self::new(root));
        }

        let cwd = std::env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()))?;
        Ok(Self::new(cwd.join(root)))
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parent directory of all per-job staging directories.
    pub fn staging_root(&self) -> PathBuf {
        self.root.join(STAGING_DIR_NAME)
    }

    /// Staging directory for one job.
    pub fn job_staging_dir(&self, id: &JobId) -> PathBuf {
        self.staging_root().join(id.to_string())
    }

    /// Path of a stored file, constrained to the storage root.
    pub fn stored_path(&self, filename: &str) -> Result<PathBuf, PathError> {
        Ok(self.root.join(validate_file_name(filename)?))
    }

    /// Create the storage root and staging root if missing and check that
    /// the staging root accepts new files.
    pub fn ensure(&self) -> Result<(), PathError> {
        let staging = self.staging_root();
        for dir in [self.root.as_path(), staging.as_path()] {
            if dir.exists() && !dir.is_dir() {
                return Err(PathError::NotADirectory(dir.to_path_buf()));
            }
        }

        fs::create_dir_all(&staging).map_err(|e| PathError::CreateFailed {
            path: staging.clone(),
            reason: e.to_string(),
        })?;

        // Staging and the root share a filesystem, so one probe covers both.
        let probe = staging.join(".write_probe");
        fs::write(&probe, b"").map_err(|e| PathError::NotWritable {
            path: staging.clone(),
            reason: e.to_string(),
        })?;
        let _ = fs::remove_file(&probe);
        Ok(())
    }
}

/// Check that `name` is a single plain path component.
///
/// Rejects empty names, `.` and `..`, anything containing a path separator
/// (either `/` or `\`, on every platform) and embedded NUL bytes.
pub fn validate_file_name(name: &str) -> Result<&str, PathError> {
    if name.is_empty() {
        return Err(PathError::EmptyPath);
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(PathError::InvalidFileName(name.to_string()));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(name),
        _ => Err(PathError::InvalidFileName(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_path_stays_inside_root() {
        let layout = StorageLayout::new("/srv/downloads");
        assert_eq!(
            layout.stored_path("sample.mp4").unwrap(),
            PathBuf::from("/srv/downloads/sample.mp4")
        );
    }

    #[test]
    fn traversal_and_separators_are_rejected() {
        for name in ["..", ".", "../etc/passwd", "a/b.mp4", "a\\b.mp4", "/abs.mp4", "nul\0.mp4"] {
            assert!(validate_file_name(name).is_err(), "{name:?} should be rejected");
        }
        assert!(matches!(validate_file_name(""), Err(PathError::EmptyPath)));
    }

    #[test]
    fn dotted_names_are_plain_components() {
        for name in ["...mp4", ".hidden.mp4", "My_Video__Part_1.mp4", "日本語.webm"] {
            assert_eq!(validate_file_name(name).unwrap(), name);
        }
    }

    #[test]
    fn staging_dirs_are_per_job() {
        let layout = StorageLayout::new("/srv/downloads");
        let a = JobId::new();
        let b = JobId::new();
        assert_ne!(layout.job_staging_dir(&a), layout.job_staging_dir(&b));
        assert!(layout.job_staging_dir(&a).starts_with("/srv/downloads/.partial"));
    }

    #[test]
    fn ensure_creates_root_and_staging() {
        let temp = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(temp.path().join("nested").join("downloads"));

        layout.ensure().unwrap();
        assert!(layout.root().is_dir());
        assert!(layout.staging_root().is_dir());
        assert_eq!(fs::read_dir(layout.staging_root()).unwrap().count(), 0);

        // Idempotent on an existing tree.
        layout.ensure().unwrap();
    }

    #[test]
    fn ensure_rejects_a_file_in_place_of_the_root() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("downloads");
        fs::write(&root, b"x").unwrap();

        let err = StorageLayout::new(&root).ensure().unwrap_err();
        assert!(matches!(err, PathError::NotADirectory(p) if p == root));
    }

    #[test]
    fn resolve_makes_relative_roots_absolute() {
        let layout = StorageLayout::resolve(None).unwrap();
        assert!(layout.root().is_absolute());
        assert!(layout.root().ends_with(DEFAULT_STORAGE_DIR));

        let absolute = StorageLayout::resolve(Some(Path::new("/tmp/vidfetch"))).unwrap();
        assert_eq!(absolute.root(), Path::new("/tmp/vidfetch"));

        assert!(matches!(
            StorageLayout::resolve(Some(Path::new(""))),
            Err(PathError::EmptyPath)
        ));
    }
}
