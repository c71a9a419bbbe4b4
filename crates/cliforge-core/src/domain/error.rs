// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// A configuration value that breaks one of the size limits in
/// [`crate::domain::limits`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitViolation {
    #[error(
        "config value '{key}' exceeds maximum string length: {length} bytes (max {max} bytes)"
    )]
    StringTooLong {
        key: String,
        length: usize,
        max: usize,
    },

    #[error("config value '{key}' exceeds maximum slice length: {length} elements (max {max})")]
    SliceTooLong {
        key: String,
        length: usize,
        max: usize,
    },

    #[error("config value '{key}' exceeds maximum map size: {length} entries (max {max})")]
    MapTooLarge {
        key: String,
        length: usize,
        max: usize,
    },
}

impl LimitViolation {
    /// Fully-qualified key of the offending value.
    pub fn key(&self) -> &str {
        match self {
            Self::StringTooLong { key, .. }
            | Self::SliceTooLong { key, .. }
            | Self::MapTooLarge { key, .. } => key,
        }
    }
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Security Violations
    // ========================================================================
    #[error(
        "config file {} is world-writable (mode {mode:04o}); remove write access for others",
        path.display()
    )]
    WorldWritable { path: PathBuf, mode: u32 },

    #[error("config file {} is too large: {size} bytes (max {max} bytes)", path.display())]
    FileTooLarge { path: PathBuf, size: u64, max: i64 },

    // ========================================================================
    // Registry Constraints
    // ========================================================================
    #[error("invalid option key '{key}': {reason}")]
    InvalidOptionKey { key: String, reason: &'static str },

    #[error("option key '{key}' is registered more than once")]
    DuplicateOptionKey { key: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::WorldWritable { path, .. } => vec![
                "Config files must not be writable by other users".into(),
                format!("Fix with: chmod o-w {}", path.display()),
            ],
            Self::FileTooLarge { max, .. } => vec![
                format!("Config files are limited to {max} bytes"),
                "Move bulky data out of the config file".into(),
            ],
            Self::InvalidOptionKey { .. } | Self::DuplicateOptionKey { .. } => vec![
                "This is a bug in an options provider".into(),
                "Each option key must be a unique, dot-delimited path".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::WorldWritable { .. } | Self::FileTooLarge { .. } => ErrorCategory::Security,
            Self::InvalidOptionKey { .. } | Self::DuplicateOptionKey { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Security,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_writable_message_names_the_condition() {
        let err = DomainError::WorldWritable {
            path: PathBuf::from("/etc/app.yaml"),
            mode: 0o666,
        };
        let msg = err.to_string();
        assert!(msg.contains("world-writable"));
        assert!(msg.contains("0666"));
        assert_eq!(err.category(), ErrorCategory::Security);
    }

    #[test]
    fn file_too_large_message() {
        let err = DomainError::FileTooLarge {
            path: PathBuf::from("big.yaml"),
            size: 12,
            max: 0,
        };
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn limit_violation_names_key_and_sizes() {
        let violation = LimitViolation::StringTooLong {
            key: "app.name".into(),
            length: 11,
            max: 10,
        };
        assert_eq!(violation.key(), "app.name");
        assert!(violation.to_string().contains("11 bytes (max 10 bytes)"));
    }

    #[test]
    fn registry_errors_are_internal() {
        let err = DomainError::DuplicateOptionKey { key: "a.b".into() };
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.suggestions().is_empty());
    }
}
