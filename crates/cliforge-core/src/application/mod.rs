//! Application layer for cliforge.
//!
//! This layer contains:
//! - **Registry**: the explicitly composed set of known options
//! - **Services**: use case orchestration (ConfigValidator, SecurityValidator)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The rules themselves live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod registry;
pub mod services;

pub use registry::OptionRegistry;

pub use services::{CheckedFile, ConfigValidator, SecurityValidator};

// Re-export port traits (for adapter implementation)
pub use ports::{ConfigSource, DocumentParser, FileInfo, SettingsStore};

pub use error::ApplicationError;
