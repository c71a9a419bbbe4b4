//! `cliforge config`: validate files and inspect configuration.

use std::path::Path;

use cliforge_adapters::{LocalConfigSource, YamlParser};
use cliforge_core::{
    application::{ConfigValidator, OptionRegistry},
    domain::{ConfigOption, ValidationResult},
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    bootstrap::ENV_PREFIX,
    cli::{ConfigCommands, OutputFormat, ReportFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    registry: &OptionRegistry,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Validate { file, format } => validate(&file, format, registry, &output),
        ConfigCommands::Get { key } => get(&key, &config, &output),
        ConfigCommands::List => list(registry, &config, &output),
        ConfigCommands::Env => env(registry, &output),
        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
            Ok(())
        }
    }
}

// ── validate ──────────────────────────────────────────────────────────────────

#[instrument(skip(registry, output), fields(path = %file.display()))]
fn validate(
    file: &Path,
    format: ReportFormat,
    registry: &OptionRegistry,
    output: &OutputManager,
) -> CliResult<()> {
    let validator = ConfigValidator::new(
        registry,
        Box::new(LocalConfigSource::new()),
        Box::new(YamlParser::new()),
    );
    let result = validator.validate_file(file)?;

    match format {
        ReportFormat::Json => output.json(&result)?,
        ReportFormat::Human => report(&result, output)?,
    }

    if result.is_valid() && !result.has_warnings() {
        Ok(())
    } else {
        Err(CliError::ValidationFailed {
            path: file.to_path_buf(),
            errors: result.errors().len(),
            warnings: result.warnings().len(),
        })
    }
}

fn report(result: &ValidationResult, output: &OutputManager) -> std::io::Result<()> {
    let path = result.config_file().display();
    output.header(&format!("Validating {path}"))?;
    for error in result.errors() {
        output.error(error)?;
    }
    for warning in result.warnings() {
        output.warning(warning)?;
    }
    if result.is_valid() {
        output.success(&format!("{path} is valid"))
    } else {
        output.error(&format!("{path} is invalid"))
    }
}

// ── get ───────────────────────────────────────────────────────────────────────

fn get(key: &str, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let value = config.get(key)?.ok_or_else(|| CliError::UnknownKey {
        key: key.to_owned(),
    })?;

    if output.format() == OutputFormat::Json {
        return output.json(&value);
    }
    output.print(&value.to_string())?;
    Ok(())
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OptionRow {
    #[serde(flatten)]
    option: ConfigOption,
    env: String,
    value: Option<String>,
}

fn list(registry: &OptionRegistry, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let rows = registry
        .options()
        .into_iter()
        .map(|option| -> CliResult<OptionRow> {
            let value = config.get(option.key())?.map(|v| v.to_string());
            Ok(OptionRow {
                env: option.env_var_name(ENV_PREFIX),
                option,
                value,
            })
        })
        .collect::<CliResult<Vec<_>>>()?;

    if output.format() == OutputFormat::Json {
        return output.json(&rows);
    }

    if let Some(file) = config.file() {
        output.info(&format!("Config file: {}", file.display()))?;
    }
    output.header("Registered options:")?;
    let width = rows.iter().map(|r| r.option.key().len()).max().unwrap_or(0);
    for row in &rows {
        output.print(&format!(
            "  {:<width$}  {:<8}  {:<12}  {}",
            row.option.key(),
            row.option.value_type().to_string(),
            row.value.as_deref().unwrap_or("-"),
            row.env,
        ))?;
        if !row.option.description().is_empty() {
            output.print(&format!("  {:<width$}  {}", "", row.option.description()))?;
        }
    }
    Ok(())
}

// ── env ───────────────────────────────────────────────────────────────────────

fn env(registry: &OptionRegistry, output: &OutputManager) -> CliResult<()> {
    let vars = registry.env_vars(ENV_PREFIX);

    if output.format() == OutputFormat::Json {
        let map: std::collections::BTreeMap<_, _> =
            vars.into_iter().map(|(key, name)| (name, key)).collect();
        return output.json(&map);
    }

    let width = vars.iter().map(|(_, name)| name.len()).max().unwrap_or(0);
    for (key, name) in &vars {
        output.print(&format!("{name:<width$}  {key}"))?;
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::build_registry;

    #[test]
    fn option_rows_serialize_flat() {
        let row = OptionRow {
            option: ConfigOption::string("app.ping.message", "pong"),
            env: "CLIFORGE_APP_PING_MESSAGE".into(),
            value: Some("pong".into()),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["key"], "app.ping.message");
        assert_eq!(json["env"], "CLIFORGE_APP_PING_MESSAGE");
        assert_eq!(json["value"], "pong");
    }

    #[test]
    fn get_unknown_key_is_not_found() {
        let cfg = AppConfig::from_layers(&build_registry(), None, &[]).unwrap();
        let args = crate::cli::GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        let output = OutputManager::new(&args, &cfg);
        let err = get("does.not.exist", &cfg, &output).unwrap_err();
        assert!(matches!(err, CliError::UnknownKey { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
