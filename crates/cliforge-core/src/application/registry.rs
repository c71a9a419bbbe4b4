//! Option registry - the single source of truth for known configuration keys.
//!
//! The registry is composed explicitly: the binary's bootstrap creates it
//! with the core options and then calls [`OptionRegistry::register`] once per
//! subcommand provider. After bootstrap it is only ever read, so it can be
//! shared by reference without synchronisation.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, instrument};

use crate::{
    application::ports::SettingsStore,
    domain::{ConfigOption, DomainError, OptionType, OptionsProvider},
    error::ForgeResult,
};

/// Aggregated, ordered set of configuration options.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    core: Vec<ConfigOption>,
    providers: Vec<OptionsProvider>,
}

impl OptionRegistry {
    /// Create a registry seeded with the core (non-subcommand) options.
    pub fn new(core: Vec<ConfigOption>) -> Self {
        Self {
            core,
            providers: Vec::new(),
        }
    }

    /// Add a provider. Call during bootstrap only, before the registry is
    /// shared.
    pub fn register(&mut self, provider: OptionsProvider) {
        self.providers.push(provider);
    }

    /// Core options followed by every provider's options, in registration
    /// order.
    pub fn options(&self) -> Vec<ConfigOption> {
        self.core
            .iter()
            .cloned()
            .chain(self.providers.iter().flat_map(|provider| provider()))
            .collect()
    }

    /// Look up one option by key.
    pub fn get(&self, key: &str) -> Option<ConfigOption> {
        self.options().into_iter().find(|opt| opt.key() == key)
    }

    /// Every registered key with its declared type.
    pub fn known_keys(&self) -> BTreeMap<String, OptionType> {
        self.options()
            .into_iter()
            .map(|opt| (opt.key().to_owned(), opt.value_type()))
            .collect()
    }

    /// Check key syntax and uniqueness.
    pub fn validate(&self) -> ForgeResult<()> {
        let mut seen = HashSet::new();
        for option in self.options() {
            let key = option.key();
            if key.is_empty() {
                return Err(invalid_key(key, "key is empty"));
            }
            if key.split('.').any(str::is_empty) {
                return Err(invalid_key(key, "key has an empty segment"));
            }
            if !seen.insert(key.to_owned()) {
                return Err(DomainError::DuplicateOptionKey {
                    key: key.to_owned(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Apply every option's default to `store`.
    ///
    /// Idempotent: calling it again with the same registry leaves the store
    /// unchanged.
    #[instrument(skip_all)]
    pub fn set_defaults(&self, store: &dyn SettingsStore) -> ForgeResult<()> {
        let options = self.options();
        for option in &options {
            store.set_default(option.key(), option.default_value())?;
        }
        debug!(count = options.len(), "Applied option defaults");
        Ok(())
    }

    /// `(key, PREFIX_KEY)` pairs for every option, in registry order.
    pub fn env_vars(&self, prefix: &str) -> Vec<(String, String)> {
        self.options()
            .into_iter()
            .map(|opt| {
                let name = opt.env_var_name(prefix);
                (opt.key().to_owned(), name)
            })
            .collect()
    }
}

fn invalid_key(key: &str, reason: &'static str) -> crate::error::ForgeError {
    DomainError::InvalidOptionKey {
        key: key.to_owned(),
        reason,
    }
    .into()
}
