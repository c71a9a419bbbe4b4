//! Core domain layer for cliforge.
//!
//! Pure rules over configuration data: option metadata, value shapes, size
//! limits and file security checks. No I/O happens here; files are
//! inspected through the ports in [`crate::application::ports`].

pub mod entities;
pub mod error;
pub mod limits;
pub mod security;
pub mod value_objects;

pub use entities::{ConfigOption, OptionsProvider, ValidationResult, env_var_name};

pub use error::{DomainError, ErrorCategory, LimitViolation};

pub use value_objects::{ConfigMap, ConfigValue, OptionType, insert_dotted};
