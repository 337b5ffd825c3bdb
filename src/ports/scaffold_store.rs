//! Storage port for template input and generated scaffold files.

use std::path::Path;

use crate::domain::AppError;

/// Port for the filesystem operations a scaffold run needs.
///
/// Relative paths are resolved against the store's root.
pub trait ScaffoldStore {
    /// Check whether a file or directory exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check whether a path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a file as UTF-8 text.
    fn read_file(&self, path: &Path) -> Result<String, AppError>;

    /// Create a new file with `content`, creating parent directories as needed.
    ///
    /// Fails with [`AppError::Write`] when the file already exists; existing
    /// files are never overwritten.
    fn create_file(&self, path: &Path, content: &str) -> Result<(), AppError>;
}
