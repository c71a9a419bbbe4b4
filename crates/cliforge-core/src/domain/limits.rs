//! Size limits for configuration values.
//!
//! Config files may come from untrusted locations, so every value is bounded
//! before it is handed to the rest of the program.
//!
//! Nested maps stop at the first offending entry, while
//! [`validate_all_config_values`] reports every offending top-level entry.

use tracing::trace;

use crate::domain::{
    error::LimitViolation,
    value_objects::{ConfigMap, ConfigValue},
};

/// Maximum length of a string value, in bytes.
pub const MAX_STRING_VALUE_LENGTH: usize = 10 * 1024;

/// Maximum number of elements in a list (and entries in a map).
pub const MAX_SLICE_LENGTH: usize = 1000;

/// Maximum size of a configuration file, in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Check one value, recursing into lists and maps.
///
/// Lists are checked element-wise as `key[i]` and maps as `key.nested`; in
/// both cases the first failure is returned. Scalars other than strings are
/// always accepted, and so are [`ConfigValue::Opaque`] values.
pub fn validate_config_value(key: &str, value: &ConfigValue) -> Result<(), LimitViolation> {
    match value {
        ConfigValue::Null
        | ConfigValue::Bool(_)
        | ConfigValue::Integer(_)
        | ConfigValue::Float(_) => Ok(()),

        ConfigValue::String(s) => check_string(key, s),

        ConfigValue::List(items) => {
            if items.len() > MAX_SLICE_LENGTH {
                return Err(LimitViolation::SliceTooLong {
                    key: key.to_owned(),
                    length: items.len(),
                    max: MAX_SLICE_LENGTH,
                });
            }
            for (i, item) in items.iter().enumerate() {
                validate_config_value(&format!("{key}[{i}]"), item)?;
            }
            Ok(())
        }

        ConfigValue::Map(entries) => {
            if entries.len() > MAX_SLICE_LENGTH {
                return Err(LimitViolation::MapTooLarge {
                    key: key.to_owned(),
                    length: entries.len(),
                    max: MAX_SLICE_LENGTH,
                });
            }
            for (nested, item) in entries {
                validate_config_value(&format!("{key}.{nested}"), item)?;
            }
            Ok(())
        }

        ConfigValue::Opaque(_) => {
            trace!(key, "accepting unclassified config value");
            Ok(())
        }
    }
}

/// Check every top-level entry and collect all failures in key order.
pub fn validate_all_config_values(values: &ConfigMap) -> Vec<LimitViolation> {
    values
        .iter()
        .filter_map(|(key, value)| validate_config_value(key, value).err())
        .collect()
}

fn check_string(key: &str, s: &str) -> Result<(), LimitViolation> {
    if s.len() > MAX_STRING_VALUE_LENGTH {
        return Err(LimitViolation::StringTooLong {
            key: key.to_owned(),
            length: s.len(),
            max: MAX_STRING_VALUE_LENGTH,
        });
    }
    Ok(())
}
