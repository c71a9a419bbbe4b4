//! YAML document parser.

use cliforge_core::{
    application::{ApplicationError, ports::DocumentParser},
    domain::{ConfigMap, ConfigValue},
    error::ForgeResult,
};
use serde_yaml::{Mapping, Value};
use tracing::instrument;

/// Parses YAML config documents into [`ConfigMap`]s.
///
/// The root must be a mapping; an empty document is an empty mapping.
/// Mapping keys must be scalars and are converted to strings. Tagged values
/// become [`ConfigValue::Opaque`].
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Create a new YAML parser.
    pub fn new() -> Self {
        Self
    }

    /// Render a value map as a YAML document.
    pub fn to_document(&self, values: &ConfigMap) -> ForgeResult<String> {
        serde_yaml::to_string(values).map_err(|e| {
            ApplicationError::Parse {
                reason: format!("failed to render YAML: {e}"),
            }
            .into()
        })
    }
}

impl DocumentParser for YamlParser {
    #[instrument(skip_all, fields(bytes = content.len()))]
    fn parse(&self, content: &[u8]) -> ForgeResult<ConfigMap> {
        let document: Value = serde_yaml::from_slice(content).map_err(parse_error)?;
        match document {
            Value::Null => Ok(ConfigMap::new()),
            Value::Mapping(mapping) => convert_mapping(mapping),
            other => Err(ApplicationError::Parse {
                reason: format!(
                    "top-level document must be a mapping, found {}",
                    describe(&other)
                ),
            }
            .into()),
        }
    }

    fn format_name(&self) -> &'static str {
        "yaml"
    }
}

fn convert_mapping(mapping: Mapping) -> ForgeResult<ConfigMap> {
    let mut map = ConfigMap::new();
    for (key, value) in mapping {
        map.insert(convert_key(&key)?, convert_value(value)?);
    }
    Ok(map)
}

fn convert_key(key: &Value) -> ForgeResult<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok("null".to_owned()),
        other => Err(ApplicationError::Parse {
            reason: format!("mapping keys must be scalars, found {}", describe(other)),
        }
        .into()),
    }
}

fn convert_value(value: Value) -> ForgeResult<ConfigValue> {
    Ok(match value {
        Value::Null => ConfigValue::Null,
        Value::Bool(b) => ConfigValue::Bool(b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => ConfigValue::Integer(i),
            (None, Some(f)) => ConfigValue::Float(f),
            (None, None) => ConfigValue::Opaque(n.to_string()),
        },
        Value::String(s) => ConfigValue::String(s),
        Value::Sequence(items) => ConfigValue::List(
            items
                .into_iter()
                .map(convert_value)
                .collect::<ForgeResult<Vec<_>>>()?,
        ),
        Value::Mapping(mapping) => ConfigValue::Map(convert_mapping(mapping)?),
        Value::Tagged(tagged) => {
            let rendered = serde_yaml::to_string(&Value::Tagged(tagged.clone()))
                .map(|s| s.trim_end().to_owned())
                .unwrap_or_else(|_| tagged.tag.to_string());
            ConfigValue::Opaque(rendered)
        }
    })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn parse_error(e: serde_yaml::Error) -> cliforge_core::error::ForgeError {
    ApplicationError::Parse {
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn parse(text: &str) -> ForgeResult<ConfigMap> {
        YamlParser::new().parse(text.as_bytes())
    }

    #[test]
    fn parses_nested_mapping() {
        let map = parse("app:\n  ping:\n    output_color: red\n  no_color: true\n").unwrap();
        let app = map["app"].as_map().unwrap();
        assert_eq!(app["no_color"], ConfigValue::Bool(true));
        assert_eq!(
            app["ping"].as_map().unwrap()["output_color"],
            ConfigValue::from("red")
        );
    }

    #[test]
    fn scalars_and_sequences() {
        let map = parse("i: 3\nf: 1.5\nn: ~\nl: [a, 2]\n").unwrap();
        assert_eq!(map["i"], ConfigValue::Integer(3));
        assert_eq!(map["f"], ConfigValue::Float(1.5));
        assert_eq!(map["n"], ConfigValue::Null);
        assert_eq!(
            map["l"],
            ConfigValue::List(vec![ConfigValue::from("a"), ConfigValue::Integer(2)])
        );
    }

    #[test]
    fn empty_document_is_empty_map() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn unclosed_flow_sequence_fails() {
        let err = parse("invalid_yaml: [unclosed").unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
        assert!(!err.is_access_error());
    }

    #[test]
    fn non_mapping_root_fails() {
        let err = parse("- a\n- b\n").unwrap_err();
        assert!(err.to_string().contains("found a sequence"));
    }

    #[test]
    fn scalar_keys_are_stringified() {
        let map = parse("1: one\ntrue: yes\n").unwrap();
        assert_eq!(map["1"], ConfigValue::from("one"));
        assert!(map.contains_key("true"));
    }

    #[test]
    fn complex_keys_fail() {
        assert!(parse("? [a, b]\n: value\n").is_err());
    }

    #[test]
    fn tagged_values_are_opaque() {
        let map = parse("secret: !vault abc123\n").unwrap();
        match &map["secret"] {
            ConfigValue::Opaque(text) => assert!(text.contains("vault")),
            other => panic!("expected opaque value, got {other:?}"),
        }
    }

    #[test]
    fn multiple_documents_fail() {
        assert!(parse("a: 1\n---\nb: 2\n").is_err());
    }

    #[test]
    fn invalid_utf8_fails() {
        assert!(YamlParser::new().parse(&[0xff, 0xfe, b':']).is_err());
    }

    #[test]
    fn document_round_trip_through_renderer() {
        let original = parse("app:\n  name: demo\n  tags: [x]\n").unwrap();
        let text = YamlParser::new().to_document(&original).unwrap();
        assert_eq!(parse(&text).unwrap(), original);
    }

    proptest! {
        #[test]
        fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            let _ = YamlParser::new().parse(&bytes);
        }

        #[test]
        fn arbitrary_text_never_panics(text in "[a-z:\\[\\]{}\\-\n '\"!&*#]{0,128}") {
            let _ = parse(&text);
        }
    }
}
