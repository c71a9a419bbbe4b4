//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cliforge-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{ConfigMap, ConfigValue};
use crate::error::ForgeResult;

/// Metadata about a config file, as needed by the security rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    /// Size in bytes.
    pub size: u64,
    /// POSIX permission bits, or `None` where the platform has no such model.
    pub mode: Option<u32>,
}

/// Port for reading config files.
///
/// Implemented by:
/// - `cliforge_adapters::source::LocalConfigSource` (production)
/// - `cliforge_adapters::source::MemoryConfigSource` (testing)
///
/// Both methods must report missing or unreadable files as
/// `ApplicationError::Stat` / `ApplicationError::Read` so callers can tell
/// access failures from rule violations.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigSource: Send + Sync {
    /// Stat the file.
    fn inspect(&self, path: &Path) -> ForgeResult<FileInfo>;

    /// Read the whole file.
    fn read(&self, path: &Path) -> ForgeResult<Vec<u8>>;
}

/// Port for structured document parsing.
///
/// Implemented by:
/// - `cliforge_adapters::parser::YamlParser`
pub trait DocumentParser: Send + Sync {
    /// Parse a document whose root must be a mapping. An empty document
    /// yields an empty map.
    ///
    /// Malformed input returns `ApplicationError::Parse`; it must never panic.
    fn parse(&self, content: &[u8]) -> ForgeResult<ConfigMap>;

    /// Human-readable format name, e.g. `"yaml"`.
    fn format_name(&self) -> &'static str;
}

/// Port for the live configuration store that option defaults are applied to.
///
/// Implemented by:
/// - `cliforge_adapters::settings::LayeredSettings` (backed by the `config` crate)
/// - `cliforge_adapters::settings::MemorySettings` (testing)
pub trait SettingsStore: Send + Sync {
    /// Record `value` as the default for `key`, replacing any earlier default.
    fn set_default(&self, key: &str, value: &ConfigValue) -> ForgeResult<()>;
}
