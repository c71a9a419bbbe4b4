//! Layered settings backed by the `config` crate.
//!
//! Precedence, lowest first: option defaults, the config document,
//! environment overrides.
//!
//! The document layer takes values that were already parsed (and usually
//! validated) rather than a path, so what gets loaded is exactly what was
//! checked.

use std::{collections::BTreeMap, sync::RwLock};

use cliforge_core::{
    application::{ApplicationError, OptionRegistry, ports::SettingsStore},
    domain::{ConfigMap, ConfigValue},
    error::ForgeResult,
};
use config::{Config, ConfigError, Map, Source, Value, ValueKind};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Collects option defaults, then builds the effective settings.
#[derive(Debug, Default)]
pub struct LayeredSettings {
    defaults: RwLock<BTreeMap<String, ConfigValue>>,
}

impl LayeredSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with every default in `registry`.
    pub fn from_registry(registry: &OptionRegistry) -> ForgeResult<Self> {
        let settings = Self::new();
        registry.set_defaults(&settings)?;
        Ok(settings)
    }

    /// Layer `document` (if given) and `overrides` on top of the recorded
    /// defaults.
    ///
    /// `overrides` are `(dotted key, raw value)` pairs, usually from
    /// [`env_overrides`].
    #[instrument(skip(self, overrides), fields(overrides = overrides.len()))]
    pub fn build(
        &self,
        document: Option<&ConfigMap>,
        overrides: &[(String, String)],
    ) -> ForgeResult<EffectiveSettings> {
        let defaults = self
            .defaults
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut builder = Config::builder();
        for (key, value) in defaults.iter() {
            builder = builder
                .set_default(key.as_str(), to_value(value))
                .map_err(settings_error)?;
        }

        if let Some(values) = document {
            debug!(keys = values.len(), "Adding config document layer");
            builder = builder.add_source(DocumentSource {
                values: values.clone(),
            });
        }

        for (key, raw) in overrides {
            debug!(key = %key, "Applying environment override");
            builder = builder
                .set_override(key.as_str(), raw.as_str())
                .map_err(settings_error)?;
        }

        let config = builder.build().map_err(settings_error)?;
        Ok(EffectiveSettings { config })
    }
}

impl SettingsStore for LayeredSettings {
    fn set_default(&self, key: &str, value: &ConfigValue) -> ForgeResult<()> {
        let mut defaults = self
            .defaults
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        defaults.insert(key.to_owned(), value.clone());
        Ok(())
    }
}

/// A parsed config document exposed as a `config` source.
#[derive(Debug, Clone)]
struct DocumentSource {
    values: ConfigMap,
}

impl Source for DocumentSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        Ok(self
            .values
            .iter()
            .map(|(key, value)| (key.clone(), to_value(value)))
            .collect())
    }
}

/// Read the environment override of every registered option.
///
/// Variable names come from `ConfigOption::env_var_name`, so
/// `app.ping.message` with prefix `CLIFORGE` reads `CLIFORGE_APP_PING_MESSAGE`.
pub fn env_overrides(registry: &OptionRegistry, prefix: &str) -> Vec<(String, String)> {
    overrides_from(registry, prefix, |name| std::env::var(name).ok())
}

/// Like [`env_overrides`] with a custom variable lookup.
pub fn overrides_from(
    registry: &OptionRegistry,
    prefix: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<(String, String)> {
    registry
        .env_vars(prefix)
        .into_iter()
        .filter_map(|(key, name)| lookup(&name).map(|value| (key, value)))
        .collect()
}

/// The merged result of every settings layer.
#[derive(Debug, Clone)]
pub struct EffectiveSettings {
    config: Config,
}

impl EffectiveSettings {
    /// Effective value at a dotted key, or `None` when nothing sets it.
    pub fn get(&self, key: &str) -> ForgeResult<Option<ConfigValue>> {
        match self.config.get::<ConfigValue>(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(settings_error(e)),
        }
    }

    /// Deserialize the merged settings into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> ForgeResult<T> {
        self.config.clone().try_deserialize().map_err(settings_error)
    }
}

fn to_value(value: &ConfigValue) -> Value {
    let kind = match value {
        ConfigValue::Null => ValueKind::Nil,
        ConfigValue::Bool(b) => ValueKind::Boolean(*b),
        ConfigValue::Integer(i) => ValueKind::I64(*i),
        ConfigValue::Float(f) => ValueKind::Float(*f),
        ConfigValue::String(s) | ConfigValue::Opaque(s) => ValueKind::String(s.clone()),
        ConfigValue::List(items) => ValueKind::Array(items.iter().map(to_value).collect()),
        ConfigValue::Map(entries) => ValueKind::Table(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), to_value(v)))
                .collect::<Map<String, Value>>(),
        ),
    };
    Value::new(None, kind)
}

fn settings_error(e: ConfigError) -> cliforge_core::error::ForgeError {
    ApplicationError::SettingsStore {
        reason: e.to_string(),
    }
    .into()
}
