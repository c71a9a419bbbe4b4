//! Unified error handling for cliforge Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for cliforge Core operations.
#[derive(Debug, Error, Clone)]
pub enum ForgeError {
    /// Rule violations (security, limits, registry constraints).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Failures to inspect, read or parse input.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl ForgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Security => ErrorCategory::Security,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// `true` when the input could not be evaluated at all (as opposed to
    /// being evaluated and rejected).
    pub fn is_access_error(&self) -> bool {
        matches!(self, Self::Application(e) if e.is_access_error())
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Access,
    Security,
    Validation,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ForgeResult<T> = Result<T, ForgeError>;
