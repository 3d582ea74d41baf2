//! Scoped ownership of the pipeline's local working files

use std::path::{Path, PathBuf};

/// Removes every registered file when dropped, unless told to keep them.
///
/// Register a path before the stage that creates it so partially written
/// files are removed too.
#[derive(Debug, Default)]
pub struct LocalFileGuard {
    paths: Vec<PathBuf>,
    keep: bool,
}

impl LocalFileGuard {
    pub fn new(keep: bool) -> Self {
        Self {
            paths: Vec::new(),
            keep,
        }
    }

    /// Track `path` for removal and hand it back.
    pub fn track(&mut self, path: impl Into<PathBuf>) -> PathBuf {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path.clone());
        }
        path
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Keep the tracked files on disk after the guard is dropped.
    pub fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for LocalFileGuard {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        for path in &self.paths {
            remove_quietly(path);
        }
    }
}

fn remove_quietly(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed local file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove local file"
        ),
    }
}
