//! cliforge Core - configuration registry and validation
//!
//! This crate provides the domain and application layers for the cliforge
//! CLI scaffold, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          cliforge-cli (CLI)             │
//! │   (bootstrap, commands, reporting)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (OptionRegistry, ConfigValidator, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ConfigSource, DocumentParser,          │
//! │  SettingsStore)                         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    cliforge-adapters (Infrastructure)   │
//! │ (LocalConfigSource, YamlParser, ...)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ConfigOption, ConfigValue, limits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cliforge_core::{
//!     application::{ConfigValidator, OptionRegistry},
//!     domain::ConfigOption,
//! };
//!
//! // 1. Compose the registry explicitly at startup
//! let mut registry = OptionRegistry::new(vec![ConfigOption::bool("app.no_color", false)]);
//! registry.register(ping_options);
//!
//! // 2. Validate a file with injected adapters
//! let validator = ConfigValidator::new(&registry, source, parser);
//! let result = validator.validate_file("config.yaml".as_ref()).unwrap();
//! assert!(result.is_valid());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ConfigValidator, OptionRegistry, SecurityValidator,
        ports::{ConfigSource, DocumentParser, FileInfo, SettingsStore},
    };
    pub use crate::domain::{
        ConfigMap, ConfigOption, ConfigValue, OptionType, OptionsProvider, ValidationResult,
        limits::{MAX_CONFIG_FILE_SIZE, MAX_SLICE_LENGTH, MAX_STRING_VALUE_LENGTH},
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
