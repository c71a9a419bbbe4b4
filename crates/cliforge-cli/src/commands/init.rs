//! `cliforge init`: write a default configuration file.
//!
//! The document is generated from the registry, so every registered option
//! appears with its default value.

use std::path::Path;

use cliforge_adapters::{LocalConfigSource, YamlParser};
use cliforge_core::{
    application::{ConfigValidator, OptionRegistry},
    domain::{ConfigMap, insert_dotted},
};
use tracing::{debug, instrument};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

const HEADER: &str = "\
# cliforge configuration
# Generated by `cliforge init`. Every key can also be set through the
# environment variable listed by `cliforge config env`.
";

/// Create a default configuration file.
#[instrument(skip_all)]
pub fn execute(args: InitArgs, registry: &OptionRegistry, output: OutputManager) -> CliResult<()> {
    let path = args.path.unwrap_or_else(AppConfig::config_path);

    if path.exists() {
        if !args.force {
            return Err(CliError::ConfigExists { path });
        }
        if !args.yes && !confirm_overwrite(&path)? {
            return Err(CliError::Cancelled);
        }
    }

    let document = render_defaults(registry)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(&path, &document)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;
    restrict_permissions(&path)?;
    debug!(path = %path.display(), bytes = document.len(), "Config written");

    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

/// Registry defaults as a YAML document, checked against the same rules
/// `config validate` applies.
fn render_defaults(registry: &OptionRegistry) -> CliResult<String> {
    let mut values = ConfigMap::new();
    for option in registry.options() {
        insert_dotted(&mut values, option.key(), option.default_value().clone());
    }

    let validator = ConfigValidator::new(
        registry,
        Box::new(LocalConfigSource::new()),
        Box::new(YamlParser::new()),
    );
    let result = validator.validate_values(&values);
    if !result.is_valid() {
        return Err(CliError::ConfigError {
            message: format!("registry defaults are invalid: {}", result.errors().join("; ")),
            source: None,
        });
    }

    let body = YamlParser::new()
        .to_document(&values)
        .with_cli_context(|| "rendering default configuration")?;
    Ok(format!("{HEADER}{body}"))
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> CliResult<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .with_cli_context(|| format!("Failed to set permissions on '{}'", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> CliResult<()> {
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm_overwrite(path: &Path) -> CliResult<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(format!("Overwrite {}?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: "could not read confirmation".into(),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm_overwrite(_path: &Path) -> CliResult<bool> {
    Ok(true)
}
