//! In-memory config source for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use cliforge_core::{
    application::{
        ApplicationError,
        ports::{ConfigSource, FileInfo},
    },
    error::ForgeResult,
};

/// In-memory config source for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigSource {
    inner: Arc<RwLock<HashMap<PathBuf, MemoryFile>>>,
}

#[derive(Debug, Clone)]
struct MemoryFile {
    content: Vec<u8>,
    mode: Option<u32>,
}

impl MemoryConfigSource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file with owner-only permissions.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.insert_with_mode(path, content, Some(0o600));
    }

    /// Add (or replace) a file with explicit permission bits; `None`
    /// simulates a platform without a permission model.
    pub fn insert_with_mode(
        &self,
        path: impl Into<PathBuf>,
        content: impl Into<Vec<u8>>,
        mode: Option<u32>,
    ) {
        if let Ok(mut inner) = self.inner.write() {
            inner.insert(
                path.into(),
                MemoryFile {
                    content: content.into(),
                    mode,
                },
            );
        }
    }

    /// Remove a file (testing helper).
    pub fn remove(&self, path: &Path) {
        if let Ok(mut inner) = self.inner.write() {
            inner.remove(path);
        }
    }

    fn get(&self, path: &Path) -> ForgeResult<Option<MemoryFile>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.get(path).cloned())
    }
}

impl ConfigSource for MemoryConfigSource {
    fn inspect(&self, path: &Path) -> ForgeResult<FileInfo> {
        let file = self.get(path)?.ok_or_else(|| ApplicationError::Stat {
            path: path.to_path_buf(),
            reason: "No such file or directory".into(),
        })?;
        Ok(FileInfo {
            size: file.content.len() as u64,
            mode: file.mode,
        })
    }

    fn read(&self, path: &Path) -> ForgeResult<Vec<u8>> {
        let file = self.get(path)?.ok_or_else(|| ApplicationError::Read {
            path: path.to_path_buf(),
            reason: "No such file or directory".into(),
        })?;
        Ok(file.content)
    }
}
