use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::ScaffoldStore;

/// Filesystem-backed scaffold store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FilesystemScaffoldStore {
    root: PathBuf,
}

impl FilesystemScaffoldStore {
    /// Create a store that resolves relative paths against `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl ScaffoldStore for FilesystemScaffoldStore {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path).is_dir()
    }

    fn read_file(&self, path: &Path) -> Result<String, AppError> {
        let full = self.resolve(path);
        fs::read_to_string(&full).map_err(|err| match err.kind() {
            ErrorKind::NotFound => AppError::PathNotFound(path.to_path_buf()),
            _ => AppError::Io(err),
        })
    }

    fn create_file(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let full = self.resolve(path);
        let write_error = |reason: String| AppError::Write { path: path.to_path_buf(), reason };

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        let mut file = OpenOptions::new().write(true).create_new(true).open(&full).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                write_error("file already exists".into())
            } else {
                write_error(e.to_string())
            }
        })?;
        file.write_all(content.as_bytes()).map_err(|e| write_error(e.to_string()))
    }
}
