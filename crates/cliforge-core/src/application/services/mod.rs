//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain rules and ports to accomplish
//! high-level use cases like "validate this config file".

pub mod config_validator;
pub mod security_validator;

pub use config_validator::{CheckedFile, ConfigValidator};
pub use security_validator::SecurityValidator;
