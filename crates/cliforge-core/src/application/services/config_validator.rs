//! Config Validator - one pass/fail/warnings report per config file.
//!
//! Pipeline:
//! 1. Permissions (violation: one error, stop)
//! 2. Size against [`MAX_CONFIG_FILE_SIZE`] (violation: one error, stop)
//! 3. Read + parse (failure: exactly one error, stop)
//! 4. Unknown keys (one warning per unknown leaf path)
//! 5. Value limits (one error per offending top-level entry)
//!
//! Steps 1 and 2 share a single stat of the file. Failing to stat or read
//! the file is not a finding: it is returned as an access error instead of
//! a [`ValidationResult`].

use std::{collections::BTreeMap, path::Path};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        OptionRegistry,
        ports::{ConfigSource, DocumentParser},
    },
    domain::{
        ConfigMap, ConfigValue, DomainError, OptionType, ValidationResult,
        limits::{MAX_CONFIG_FILE_SIZE, validate_all_config_values},
        security,
    },
    error::ForgeResult,
};

/// Outcome of [`ConfigValidator::load_file`]: the report, plus the values
/// exactly as they were checked.
#[derive(Debug, Clone)]
pub struct CheckedFile {
    pub result: ValidationResult,
    /// `None` when the pipeline stopped before the document was parsed.
    pub values: Option<ConfigMap>,
}

/// Validates config files and in-memory value maps against the registry.
pub struct ConfigValidator {
    known_keys: BTreeMap<String, OptionType>,
    source: Box<dyn ConfigSource>,
    parser: Box<dyn DocumentParser>,
}

impl ConfigValidator {
    /// Create a validator that knows every key in `registry`.
    pub fn new(
        registry: &OptionRegistry,
        source: Box<dyn ConfigSource>,
        parser: Box<dyn DocumentParser>,
    ) -> Self {
        Self::with_known_keys(registry.known_keys(), source, parser)
    }

    pub fn with_known_keys(
        known_keys: BTreeMap<String, OptionType>,
        source: Box<dyn ConfigSource>,
        parser: Box<dyn DocumentParser>,
    ) -> Self {
        Self {
            known_keys,
            source,
            parser,
        }
    }

    /// Run the full pipeline over one file.
    pub fn validate_file(&self, path: &Path) -> ForgeResult<ValidationResult> {
        Ok(self.load_file(path)?.result)
    }

    /// Run the full pipeline and keep the parsed values, so a caller can
    /// apply the same document it just validated without reading it again.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_file(&self, path: &Path) -> ForgeResult<CheckedFile> {
        let mut result = ValidationResult::new(path);
        let info = self.source.inspect(path)?;
        debug!(size = info.size, mode = ?info.mode.map(|m| format!("{m:o}")), "Inspected config file");

        // 1. Permissions
        if let Err(err) = security::check_permissions(path, info.mode) {
            return Ok(rejected(result, err));
        }
        if security::is_group_writable(info.mode) {
            result.add_warning(format!(
                "config file {} is group-writable; consider restricting it to the owner",
                path.display()
            ));
        }

        // 2. Size
        let max_size = i64::try_from(MAX_CONFIG_FILE_SIZE).unwrap_or(i64::MAX);
        if let Err(err) = security::check_size(path, info.size, max_size) {
            return Ok(rejected(result, err));
        }

        // 3. Parse
        let content = self.source.read(path)?;
        let values = match self.parser.parse(&content) {
            Ok(values) => values,
            Err(err) => {
                debug!(format = self.parser.format_name(), error = %err, "Parse failed");
                result.add_error(err.to_string());
                return Ok(CheckedFile {
                    result,
                    values: None,
                });
            }
        };

        // 4 + 5
        self.check_values(&values, &mut result);

        info!(
            valid = result.is_valid(),
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            "Config file validated"
        );
        Ok(CheckedFile {
            result,
            values: Some(values),
        })
    }

    /// Run the unknown-key and limit checks over already-parsed values.
    pub fn validate_values(&self, values: &ConfigMap) -> ValidationResult {
        let mut result = ValidationResult::new("<memory>");
        self.check_values(values, &mut result);
        result
    }

    fn check_values(&self, values: &ConfigMap, result: &mut ValidationResult) {
        let mut unknown = Vec::new();
        self.collect_unknown_keys(None, values, &mut unknown);
        for key in unknown {
            result.add_warning(format!("unknown configuration key: {key}"));
        }

        for violation in validate_all_config_values(values) {
            debug!(key = violation.key(), "Value exceeds limit");
            result.add_error(violation.to_string());
        }
    }

    /// Walk the tree and collect leaf paths that are not registered.
    ///
    /// A key registered as [`OptionType::Map`] owns its whole subtree. Any
    /// other registered key is a leaf, so children nested under it are
    /// still reported.
    fn collect_unknown_keys(&self, prefix: Option<&str>, values: &ConfigMap, out: &mut Vec<String>) {
        for (key, value) in values {
            let full = match prefix {
                Some(prefix) => format!("{prefix}.{key}"),
                None => key.clone(),
            };
            match (self.known_keys.get(&full), value) {
                (Some(OptionType::Map), _) => {}
                (Some(declared), ConfigValue::Map(nested)) => {
                    debug!(key = %full, declared = %declared, found = value.kind(), "Nested map under a leaf option");
                    self.collect_unknown_keys(Some(&full), nested, out);
                }
                (Some(_), _) => {}
                (None, ConfigValue::Map(nested)) => {
                    self.collect_unknown_keys(Some(&full), nested, out)
                }
                (None, _) => out.push(full),
            }
        }
    }
}

fn rejected(mut result: ValidationResult, err: DomainError) -> CheckedFile {
    warn!(error = %err, "Config file rejected");
    result.add_error(err.to_string());
    CheckedFile {
        result,
        values: None,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use proptest::prelude::*;

    use super::*;
    use crate::{
        application::{
            ApplicationError,
            ports::{FileInfo, MockConfigSource},
        },
        domain::{ConfigOption, limits::MAX_STRING_VALUE_LENGTH, value_objects::insert_dotted},
    };

    /// Parser for a tiny `key=value` line format, enough to drive the
    /// pipeline without a YAML dependency in core.
    struct LineParser;

    impl DocumentParser for LineParser {
        fn parse(&self, content: &[u8]) -> ForgeResult<ConfigMap> {
            let text = std::str::from_utf8(content).map_err(|e| ApplicationError::Parse {
                reason: e.to_string(),
            })?;
            let mut map = ConfigMap::new();
            for line in text.lines().filter(|l| !l.trim().is_empty()) {
                let (key, value) = line.split_once('=').ok_or_else(|| ApplicationError::Parse {
                    reason: format!("missing '=' in line: {line}"),
                })?;
                insert_dotted(&mut map, key.trim(), ConfigValue::from(value.trim()));
            }
            Ok(map)
        }

        fn format_name(&self) -> &'static str {
            "lines"
        }
    }

    fn registry() -> OptionRegistry {
        let mut registry = OptionRegistry::new(vec![ConfigOption::bool("app.no_color", false)]);
        registry.register(|| {
            vec![
                ConfigOption::string("app.ping.output_color", "green"),
                ConfigOption::string("app.ping.message", "pong"),
            ]
        });
        registry
    }

    fn source(content: &'static str, mode: u32) -> MockConfigSource {
        let mut source = MockConfigSource::new();
        source.expect_inspect().returning(move |_| {
            Ok(FileInfo {
                size: content.len() as u64,
                mode: Some(mode),
            })
        });
        source
            .expect_read()
            .returning(move |_| Ok(content.as_bytes().to_vec()));
        source
    }

    fn validator(source: MockConfigSource) -> ConfigValidator {
        ConfigValidator::new(&registry(), Box::new(source), Box::new(LineParser))
    }

    fn path() -> PathBuf {
        PathBuf::from("config.conf")
    }

    #[test]
    fn known_keys_only_is_valid() {
        let v = validator(source("app.ping.message=hi\napp.no_color=true\n", 0o600));
        let result = v.validate_file(&path()).unwrap();
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert!(result.warnings().is_empty());
        assert_eq!(result.config_file(), path());
    }

    #[test]
    fn unknown_key_is_a_warning() {
        let v = validator(source("app.ping.message=hi\napp.unknown_key=value\n", 0o600));
        let result = v.validate_file(&path()).unwrap();
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert_eq!(result.warnings().len(), 1);
        assert!(result.warnings()[0].contains("app.unknown_key"));
    }

    #[test]
    fn parse_failure_is_exactly_one_error() {
        let v = validator(source("app.unknown=1\nno equals sign\n", 0o600));
        let result = v.validate_file(&path()).unwrap();
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn world_writable_stops_before_reading() {
        let mut source = MockConfigSource::new();
        source.expect_inspect().returning(|_| {
            Ok(FileInfo {
                size: 5,
                mode: Some(0o666),
            })
        });
        source.expect_read().never();

        let result = validator(source).validate_file(&path()).unwrap();
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("world-writable"));
    }

    #[test]
    fn oversized_file_stops_before_reading() {
        let mut source = MockConfigSource::new();
        source.expect_inspect().returning(|_| {
            Ok(FileInfo {
                size: MAX_CONFIG_FILE_SIZE + 1,
                mode: Some(0o600),
            })
        });
        source.expect_read().never();

        let result = validator(source).validate_file(&path()).unwrap();
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("too large"));
    }

    #[test]
    fn group_writable_adds_warning_only() {
        let v = validator(source("app.no_color=true\n", 0o664));
        let result = v.validate_file(&path()).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
        assert!(result.warnings()[0].contains("group-writable"));
    }

    #[test]
    fn stat_failure_is_returned_not_reported() {
        let mut source = MockConfigSource::new();
        source.expect_inspect().returning(|path| {
            Err(ApplicationError::Stat {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into())
        });

        let err = validator(source).validate_file(&path()).unwrap_err();
        assert!(err.is_access_error());
    }

    #[test]
    fn read_failure_is_returned_not_reported() {
        let mut source = MockConfigSource::new();
        source.expect_inspect().returning(|_| {
            Ok(FileInfo {
                size: 1,
                mode: Some(0o600),
            })
        });
        source.expect_read().returning(|path| {
            Err(ApplicationError::Read {
                path: path.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });

        assert!(
            validator(source)
                .validate_file(&path())
                .unwrap_err()
                .is_access_error()
        );
    }

    #[test]
    fn every_oversized_top_level_value_is_an_error() {
        let known = ["a", "b", "c"]
            .iter()
            .map(|k| (k.to_string(), OptionType::String))
            .collect();
        let v = ConfigValidator::with_known_keys(
            known,
            Box::new(MockConfigSource::new()),
            Box::new(LineParser),
        );
        let big = "x".repeat(MAX_STRING_VALUE_LENGTH + 1);

        let mut values = ConfigMap::new();
        values.insert("a".into(), ConfigValue::from(big.as_str()));
        values.insert("b".into(), ConfigValue::from("ok"));
        values.insert("c".into(), ConfigValue::from(big.as_str()));

        let result = v.validate_values(&values);
        assert_eq!(result.errors().len(), 2);
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn registered_map_key_accepts_subtree() {
        let known = BTreeMap::from([("app.labels".to_string(), OptionType::Map)]);
        let v = ConfigValidator::with_known_keys(
            known,
            Box::new(MockConfigSource::new()),
            Box::new(LineParser),
        );

        let mut labels = ConfigMap::new();
        labels.insert("team".into(), ConfigValue::from("core"));
        let mut app = ConfigMap::new();
        app.insert("labels".into(), ConfigValue::Map(labels));
        app.insert("other".into(), ConfigValue::Bool(true));
        let mut root = ConfigMap::new();
        root.insert("app".into(), ConfigValue::Map(app));

        let result = v.validate_values(&root);
        assert_eq!(result.warnings(), ["unknown configuration key: app.other"]);
    }

    #[test]
    fn map_under_registered_scalar_is_reported() {
        let mut values = ConfigMap::new();
        insert_dotted(&mut values, "app.ping.message.bogus", ConfigValue::from("x"));

        let result = validator(MockConfigSource::new()).validate_values(&values);
        assert!(result.is_valid());
        assert_eq!(
            result.warnings(),
            ["unknown configuration key: app.ping.message.bogus"]
        );
    }

    #[test]
    fn file_is_inspected_once() {
        let mut source = MockConfigSource::new();
        source.expect_inspect().times(1).returning(|_| {
            Ok(FileInfo {
                size: 18,
                mode: Some(0o660),
            })
        });
        source
            .expect_read()
            .times(1)
            .returning(|_| Ok(b"app.no_color=true\n".to_vec()));

        let result = validator(source).validate_file(&path()).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn load_file_returns_checked_values() {
        let checked = validator(source("app.ping.message=hi\n", 0o600))
            .load_file(&path())
            .unwrap();
        assert!(checked.result.is_valid());

        let values = checked.values.unwrap();
        let ping = values["app"].as_map().unwrap()["ping"].as_map().unwrap();
        assert_eq!(ping["message"], ConfigValue::from("hi"));
    }

    #[test]
    fn rejected_file_has_no_values() {
        let checked = validator(source("app.no_color=true\n", 0o666))
            .load_file(&path())
            .unwrap();
        assert!(!checked.result.is_valid());
        assert!(checked.values.is_none());
    }

    #[test]
    fn empty_document_is_valid() {
        let result = validator(source("", 0o600)).validate_file(&path()).unwrap();
        assert!(result.is_valid());
        assert!(!result.has_warnings());
    }

    proptest! {
        #[test]
        fn valid_flag_matches_errors_for_any_input(
            bytes in prop::collection::vec(any::<u8>(), 0..256),
            mode in prop::sample::select(vec![0o600u32, 0o644, 0o664, 0o666]),
        ) {
            let len = bytes.len() as u64;
            let mut source = MockConfigSource::new();
            source.expect_inspect().returning(move |_| Ok(FileInfo { size: len, mode: Some(mode) }));
            source.expect_read().returning(move |_| Ok(bytes.clone()));

            let result = validator(source).validate_file(&path()).unwrap();
            prop_assert_eq!(result.is_valid(), result.errors().is_empty());
        }
    }
}
