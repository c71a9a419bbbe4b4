//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down to the command
//! handlers. The core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `CLIFORGE_*` environment variables, one per registered option
//! 3. Config file (`--config`, or the default location when it exists)
//! 4. Option defaults from the registry
//!
//! A config file is read and validated once; the parsed document that passed
//! validation is what gets layered in. An invalid file stops the load
//! instead of being half-applied.

use std::path::{Path, PathBuf};

use cliforge_adapters::{
    LayeredSettings, LocalConfigSource, YamlParser,
    settings::{EffectiveSettings, env_overrides},
};
use cliforge_core::{
    application::{CheckedFile, ConfigValidator, OptionRegistry},
    domain::{ConfigMap, ConfigValue},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{
    bootstrap::ENV_PREFIX,
    error::{CliError, CliResult},
};

/// Typed view of the settings the binary itself reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub no_color: bool,
    pub quiet: bool,
    pub ping: PingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingSettings {
    pub message: String,
    pub output_color: String,
}

/// Loaded configuration: typed settings plus the merged layers behind them.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: Settings,
    effective: EffectiveSettings,
    file: Option<PathBuf>,
}

impl AppConfig {
    /// Load defaults, the config file and environment overrides.
    ///
    /// `explicit` is the path passed via `--config`; it must exist. Without
    /// it the default location is used when a file is present there.
    #[instrument(skip(registry))]
    pub fn load(registry: &OptionRegistry, explicit: Option<&Path>) -> CliResult<Self> {
        let overrides = env_overrides(registry, ENV_PREFIX);
        match resolve_file(explicit)? {
            Some(path) => {
                let document = check_file(registry, &path)?;
                Self::from_layers(registry, Some((path, document)), &overrides)
            }
            None => Self::from_layers(registry, None, &overrides),
        }
    }

    /// Load defaults and environment overrides only.
    pub fn without_file(registry: &OptionRegistry) -> CliResult<Self> {
        Self::from_layers(registry, None, &env_overrides(registry, ENV_PREFIX))
    }

    /// `file` pairs the config file's path with the document parsed from it.
    pub(crate) fn from_layers(
        registry: &OptionRegistry,
        file: Option<(PathBuf, ConfigMap)>,
        overrides: &[(String, String)],
    ) -> CliResult<Self> {
        let (file, document) = file.unzip();
        let layered = LayeredSettings::from_registry(registry)?;
        let effective = layered.build(document.as_ref(), overrides)?;
        let settings = effective.deserialize::<Settings>()?;
        debug!(file = ?file, overrides = overrides.len(), "Configuration loaded");
        Ok(Self {
            settings,
            effective,
            file,
        })
    }

    /// Effective value at a dotted key.
    pub fn get(&self, key: &str) -> CliResult<Option<ConfigValue>> {
        Ok(self.effective.get(key)?)
    }

    /// The config file that was layered in, if any.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cliforge.yaml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "cliforge", "cliforge")
            .map(|d| d.config_dir().join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from(".cliforge.yaml"))
    }
}

fn resolve_file(explicit: Option<&Path>) -> CliResult<Option<PathBuf>> {
    match explicit {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(CliError::ConfigNotFound {
            path: path.to_path_buf(),
        }),
        None => {
            let path = AppConfig::config_path();
            Ok(path.exists().then_some(path))
        }
    }
}

/// Validate `path` and return the document that passed.
fn check_file(registry: &OptionRegistry, path: &Path) -> CliResult<ConfigMap> {
    let validator = ConfigValidator::new(
        registry,
        Box::new(LocalConfigSource::new()),
        Box::new(YamlParser::new()),
    );
    let CheckedFile { result, values } = validator.load_file(path)?;

    for warning in result.warnings() {
        warn!(path = %path.display(), "{warning}");
    }
    match values {
        Some(values) if result.is_valid() => Ok(values),
        _ => Err(CliError::InvalidConfig {
            path: path.to_path_buf(),
            errors: result.errors().to_vec(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Write};

    use tempfile::TempDir;

    use super::*;
    use crate::bootstrap::build_registry;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.yaml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
        }
        path
    }

    #[test]
    fn defaults_come_from_registry() {
        let cfg = AppConfig::from_layers(&build_registry(), None, &[]).unwrap();
        assert_eq!(cfg.settings.app.ping.message, "pong");
        assert_eq!(cfg.settings.app.ping.output_color, "green");
        assert!(!cfg.settings.app.no_color);
        assert!(cfg.file().is_none());
    }

    #[test]
    fn overrides_parse_into_typed_settings() {
        let overrides = vec![
            ("app.no_color".to_owned(), "true".to_owned()),
            ("app.ping.message".to_owned(), "hello".to_owned()),
        ];
        let cfg = AppConfig::from_layers(&build_registry(), None, &overrides).unwrap();
        assert!(cfg.settings.app.no_color);
        assert_eq!(cfg.settings.app.ping.message, "hello");
    }

    #[test]
    fn explicit_file_is_layered() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "app:\n  ping:\n    output_color: red\n");
        let registry = build_registry();

        let document = check_file(&registry, &path).unwrap();
        let cfg = AppConfig::from_layers(&registry, Some((path.clone(), document)), &[]).unwrap();
        assert_eq!(cfg.settings.app.ping.output_color, "red");
        assert_eq!(cfg.file(), Some(path.as_path()));
        assert_eq!(
            cfg.get("app.ping.output_color").unwrap(),
            Some(ConfigValue::from("red"))
        );
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = resolve_file(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, CliError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "invalid_yaml: [unclosed");
        let err = check_file(&build_registry(), &path).unwrap_err();
        assert!(matches!(err, CliError::InvalidConfig { ref errors, .. } if errors.len() == 1));
    }

    #[test]
    fn unknown_keys_do_not_block_loading() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "app:\n  unknown_key: value\n");
        assert!(check_file(&build_registry(), &path).is_ok());
    }

    #[test]
    fn loaded_settings_come_from_the_checked_document() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "app:\n  ping:\n    message: checked\n");
        let registry = build_registry();

        let document = check_file(&registry, &path).unwrap();
        fs::write(&path, "app:\n  ping:\n    message: rewritten\n").unwrap();

        let cfg = AppConfig::from_layers(&registry, Some((path, document)), &[]).unwrap();
        assert_eq!(cfg.settings.app.ping.message, "checked");
    }

    #[test]
    fn nested_value_under_scalar_option_warns_but_fails_to_load() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "app:\n  ping:\n    message:\n      bogus: x\n");
        let registry = build_registry();

        let document = check_file(&registry, &path).unwrap();
        assert!(AppConfig::from_layers(&registry, Some((path, document)), &[]).is_err());
    }

    #[test]
    fn config_path_is_yaml() {
        let p = AppConfig::config_path();
        assert_eq!(p.extension().and_then(|e| e.to_str()), Some("yaml"));
    }
}
