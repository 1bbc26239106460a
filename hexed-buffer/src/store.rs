//! File storage backends.
//!
//! This module provides a trait for whole-file reads and writes, plus a
//! disk implementation and a memory-based implementation for testing.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Trait for whole-file storage.
///
/// The buffer only ever reads or writes a file in full, so this is all it
/// needs. Implementations must not lock files; change detection is
/// advisory.
pub trait FileStore {
    /// Read the full contents of `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the contents of `path` with `data`, creating it if needed.
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;
}

/// The local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        std::fs::write(path, data)
    }
}

/// In-memory file store for testing.
///
/// Clones share the same files, so a test can keep a handle and simulate
/// external modification while a buffer owns another clone.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a file, bypassing any buffer.
    pub fn put(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), data.into());
        }
    }

    /// Current contents of a file, if present.
    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().ok()?.get(path).cloned()
    }

    /// Delete a file, returning whether it existed.
    pub fn remove(&self, path: &Path) -> bool {
        self.files
            .lock()
            .map(|mut files| files.remove(path).is_some())
            .unwrap_or(false)
    }

    /// Get the number of files currently stored.
    pub fn len(&self) -> usize {
        self.files.lock().map(|files| files.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn files(&self) -> io::Result<MutexGuard<'_, HashMap<PathBuf, Vec<u8>>>> {
        self.files
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory store poisoned"))
    }
}

impl FileStore for MemoryStore {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files()?.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: no such file", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        self.files()?.insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }
}
