//! In-memory settings store.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use cliforge_core::{
    application::{ApplicationError, ports::SettingsStore},
    domain::ConfigValue,
    error::ForgeResult,
};

/// Thread-safe settings store that only records defaults.
///
/// Useful in tests and for inspecting what a registry would apply.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    inner: Arc<RwLock<BTreeMap<String, ConfigValue>>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default recorded for `key`, if any.
    pub fn get(&self, key: &str) -> ForgeResult<Option<ConfigValue>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.get(key).cloned())
    }

    /// Copy of every recorded default, keyed by dotted key.
    pub fn snapshot(&self) -> ForgeResult<BTreeMap<String, ConfigValue>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SettingsStore for MemorySettings {
    fn set_default(&self, key: &str, value: &ConfigValue) -> ForgeResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(key.to_owned(), value.clone());
        Ok(())
    }
}
