//! Registry composition.
//!
//! Every subcommand that owns configuration exposes an `options()` provider.
//! They are registered here, once, before any command runs; there is no
//! global provider list.

use cliforge_core::{application::OptionRegistry, domain::ConfigOption};

use crate::commands;

/// Prefix for every generated environment variable name.
pub const ENV_PREFIX: &str = "CLIFORGE";

/// Options that belong to the application rather than one subcommand.
pub fn core_options() -> Vec<ConfigOption> {
    vec![
        ConfigOption::bool("app.no_color", false)
            .with_description("Disable coloured output")
            .with_example("true"),
        ConfigOption::bool("app.quiet", false)
            .with_description("Suppress non-error output")
            .with_example("true"),
    ]
}

/// Build the registry with the core options and every subcommand provider.
pub fn build_registry() -> OptionRegistry {
    let mut registry = OptionRegistry::new(core_options());
    registry.register(commands::ping::options);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_well_formed() {
        assert!(build_registry().validate().is_ok());
    }

    #[test]
    fn provider_options_are_registered() {
        let registry = build_registry();
        let keys = registry.known_keys();
        assert!(keys.contains_key("app.no_color"));
        assert!(keys.contains_key("app.ping.message"));
        assert!(keys.contains_key("app.ping.output_color"));
    }

    #[test]
    fn env_names_use_prefix() {
        let registry = build_registry();
        let names: Vec<String> = registry
            .env_vars(ENV_PREFIX)
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        assert!(names.contains(&"CLIFORGE_APP_PING_MESSAGE".to_owned()));
        assert!(names.iter().all(|n| n.starts_with("CLIFORGE_")));
    }
}
