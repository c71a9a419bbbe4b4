//! Value objects: configuration values and option types.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Ordered key/value mapping of configuration values.
///
/// Keys iterate in sorted order, so every walk over a parsed document
/// reports its findings deterministically.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// A single configuration value, as produced by a document parser or
/// declared as an option default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Map(ConfigMap),
    /// A value the parser could not classify (e.g. a YAML tagged value).
    /// Carries the parser's textual rendering for diagnostics.
    Opaque(String),
}

impl ConfigValue {
    /// Short name of the value's shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Opaque(_) => "opaque",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) | Self::Opaque(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        Self::Map(map)
    }
}

/// Insert `value` at a dotted path, creating intermediate maps.
///
/// A non-map value already sitting on the path is replaced by a map.
pub fn insert_dotted(map: &mut ConfigMap, key: &str, value: ConfigValue) {
    match key.split_once('.') {
        None => {
            map.insert(key.to_owned(), value);
        }
        Some((head, rest)) => {
            let entry = map
                .entry(head.to_owned())
                .or_insert_with(|| ConfigValue::Map(ConfigMap::new()));
            if !matches!(entry, ConfigValue::Map(_)) {
                *entry = ConfigValue::Map(ConfigMap::new());
            }
            if let ConfigValue::Map(nested) = entry {
                insert_dotted(nested, rest, value);
            }
        }
    }
}

/// Declared type of a configuration option. Documentation only; values are
/// not coerced or type-checked against it at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    String,
    Bool,
    Integer,
    Float,
    StringList,
    Map,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "bool"),
            Self::Integer => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::StringList => write!(f, "[]string"),
            Self::Map => write!(f, "map"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_nested_values() {
        let mut map = ConfigMap::new();
        map.insert("b".into(), ConfigValue::from(vec!["x", "y"]));
        map.insert("a".into(), ConfigValue::from(1_i64));
        assert_eq!(ConfigValue::Map(map).to_string(), "{a: 1, b: [x, y]}");
    }

    #[test]
    fn insert_dotted_builds_nested_maps() {
        let mut map = ConfigMap::new();
        insert_dotted(&mut map, "app.ping.message", "pong".into());
        insert_dotted(&mut map, "app.no_color", false.into());

        let app = map["app"].as_map().unwrap();
        assert_eq!(app["no_color"], ConfigValue::Bool(false));
        assert_eq!(
            app["ping"].as_map().unwrap()["message"],
            ConfigValue::from("pong")
        );
    }

    #[test]
    fn insert_dotted_replaces_scalar_on_path() {
        let mut map = ConfigMap::new();
        insert_dotted(&mut map, "app", "scalar".into());
        insert_dotted(&mut map, "app.x", ConfigValue::Integer(1));
        assert_eq!(map["app"].as_map().unwrap()["x"], ConfigValue::Integer(1));
    }

    #[test]
    fn kind_names() {
        assert_eq!(ConfigValue::Null.kind(), "null");
        assert_eq!(ConfigValue::from("s").kind(), "string");
        assert_eq!(ConfigValue::Opaque("!tag x".into()).kind(), "opaque");
    }

    #[test]
    fn option_type_display() {
        assert_eq!(OptionType::StringList.to_string(), "[]string");
        assert_eq!(OptionType::Integer.to_string(), "int");
    }

    #[test]
    fn serializes_untagged() {
        let value = ConfigValue::from(vec![true, false]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[true,false]");
        assert_eq!(serde_json::to_string(&ConfigValue::Null).unwrap(), "null");
    }
}
