//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use monoseed_core::{
    application::ports::Filesystem,
    error::{MonoseedError, MonoseedResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep a handle after boxing
/// one into a service.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_chain(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

/// Point-in-time copy of a [`MemoryFilesystem`], for before/after checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySnapshot(MemoryFilesystemInner);

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn insert_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref();
        let mut inner = self.write_lock_unchecked();
        if let Some(parent) = path.parent() {
            inner.add_dir_chain(parent);
        }
        inner.files.insert(path.to_path_buf(), content.into());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read_lock_unchecked().files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read_lock_unchecked().files.keys().cloned().collect()
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot(self.read_lock_unchecked().clone())
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.write_lock_unchecked();
        inner.files.clear();
        inner.directories.clear();
    }

    fn read_lock(&self) -> MonoseedResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write_lock(&self) -> MonoseedResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }

    // Test helpers recover from poisoning instead of failing.
    fn read_lock_unchecked(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_lock_unchecked(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn poisoned() -> MonoseedError {
    MonoseedError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.read_lock()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn exists(&self, path: &Path) -> bool {
        self.read_lock()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> MonoseedResult<()> {
        let mut inner = self.write_lock()?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> MonoseedResult<Option<String>> {
        Ok(self.read_lock()?.files.get(path).cloned())
    }

    fn write_file(&self, path: &Path, content: &str) -> MonoseedResult<()> {
        let mut inner = self.write_lock()?;
        if let Some(parent) = path.parent() {
            inner.add_dir_chain(parent);
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append_file(&self, path: &Path, content: &str) -> MonoseedResult<()> {
        let mut inner = self.write_lock()?;
        if let Some(parent) = path.parent() {
            inner.add_dir_chain(parent);
        }
        inner
            .files
            .entry(path.to_path_buf())
            .or_default()
            .push_str(content);
        Ok(())
    }

    fn list_dirs(&self, path: &Path) -> MonoseedResult<Vec<PathBuf>> {
        let inner = self.read_lock()?;
        Ok(inner
            .directories
            .iter()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }
}
