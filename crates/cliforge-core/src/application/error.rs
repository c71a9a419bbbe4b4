//! Application layer errors.
//!
//! These errors represent failures to *evaluate* something (the file could
//! not be inspected, read or parsed), not rule violations. Rule violations
//! are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The config file's metadata could not be read (missing file, denied).
    #[error("failed to stat config file {}: {reason}", path.display())]
    Stat { path: PathBuf, reason: String },

    /// The config file's contents could not be read.
    #[error("failed to read config file {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    /// The document is not well-formed for its format.
    #[error("failed to parse config file: {reason}")]
    Parse { reason: String },

    /// A settings store rejected a value.
    #[error("settings store error: {reason}")]
    SettingsStore { reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("settings store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// `true` for failures that mean "could not evaluate the file".
    pub fn is_access_error(&self) -> bool {
        matches!(self, Self::Stat { .. } | Self::Read { .. })
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Stat { path, .. } | Self::Read { path, .. } => vec![
                format!("Check that {} exists", path.display()),
                "Check that you have read permissions".into(),
            ],
            Self::Parse { .. } => vec![
                "Check the file's YAML syntax".into(),
                "The top level must be a mapping of keys to values".into(),
            ],
            Self::SettingsStore { .. } | Self::StoreLockError => {
                vec!["This is likely a bug, please report it".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Stat { .. } | Self::Read { .. } => ErrorCategory::Access,
            Self::Parse { .. } => ErrorCategory::Validation,
            Self::SettingsStore { .. } => ErrorCategory::Configuration,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
