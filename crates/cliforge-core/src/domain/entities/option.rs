//! Configuration option metadata.

use serde::Serialize;

use crate::domain::value_objects::{ConfigValue, OptionType};

/// A function producing the options one feature or subcommand contributes.
///
/// Providers are registered explicitly by the binary's bootstrap code; see
/// [`crate::application::OptionRegistry::register`].
pub type OptionsProvider = fn() -> Vec<ConfigOption>;

/// A single named configuration setting.
///
/// Built once by a provider and never mutated afterwards: the fields are
/// private and the builder-style setters consume `self`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigOption {
    key: String,
    default_value: ConfigValue,
    value_type: OptionType,
    description: String,
    example: String,
    required: bool,
}

impl ConfigOption {
    /// Create an option with an explicit type and default.
    pub fn new(
        key: impl Into<String>,
        value_type: OptionType,
        default_value: impl Into<ConfigValue>,
    ) -> Self {
        Self {
            key: key.into(),
            default_value: default_value.into(),
            value_type,
            description: String::new(),
            example: String::new(),
            required: false,
        }
    }

    pub fn string(key: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self::new(key, OptionType::String, default_value.into())
    }

    pub fn bool(key: impl Into<String>, default_value: bool) -> Self {
        Self::new(key, OptionType::Bool, default_value)
    }

    pub fn integer(key: impl Into<String>, default_value: i64) -> Self {
        Self::new(key, OptionType::Integer, default_value)
    }

    pub fn string_list(key: impl Into<String>, default_value: Vec<&str>) -> Self {
        Self::new(key, OptionType::StringList, default_value)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    /// Mark the option as required. Informational only.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> &ConfigValue {
        &self.default_value
    }

    pub fn value_type(&self) -> OptionType {
        self.value_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Environment variable that addresses this option.
    pub fn env_var_name(&self, prefix: &str) -> String {
        env_var_name(&self.key, prefix)
    }
}

/// Derive `PREFIX_KEY` from a dotted key: dots become underscores and the
/// result is uppercased.
///
/// Only `.` is rewritten. Any other character (`-`, spaces, ...) is passed
/// through, so such keys produce names most shells cannot export.
pub fn env_var_name(key: &str, prefix: &str) -> String {
    format!("{}_{}", prefix, key.replace('.', "_").to_uppercase())
}
