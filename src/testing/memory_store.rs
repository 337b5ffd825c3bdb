use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::ScaffoldStore;

/// In-memory scaffold store for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryScaffoldStore {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    dirs: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MemoryScaffoldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: &str) {
        self.files.lock().unwrap().insert(path.into(), content.to_string());
    }

    /// Seed an empty directory.
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.dirs.lock().unwrap().insert(path.into());
    }

    pub fn read(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl ScaffoldStore for MemoryScaffoldStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().iter().any(|dir| dir.starts_with(path))
            || self.files.lock().unwrap().keys().any(|file| file != path && file.starts_with(path))
    }

    fn read_file(&self, path: &Path) -> Result<String, AppError> {
        self.read(path).ok_or_else(|| AppError::PathNotFound(path.to_path_buf()))
    }

    fn create_file(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let mut files = self.files.lock().unwrap();
        if files.contains_key(path) {
            return Err(AppError::Write {
                path: path.to_path_buf(),
                reason: "file already exists".into(),
            });
        }
        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
