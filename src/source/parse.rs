use crate::{Map, Value};

use super::SourceError;

/// Parses a TOML document into a map.
pub fn parse_toml(text: &str) -> Result<Map, SourceError> {
    let table: toml::Table = toml::from_str(text)?;
    into_map(Value::from(table))
}

/// Parses a JSON document, which must hold an object at the top level.
pub fn parse_json(text: &str) -> Result<Map, SourceError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    into_map(Value::from(json))
}

fn into_map(value: Value) -> Result<Map, SourceError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SourceError::NotAnObject(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let map = parse_toml("[server]\nport = 8080").unwrap();
        let server = map["server"].as_object().unwrap();
        assert_eq!(server["port"], Value::from(8080));
    }

    #[test]
    fn test_parse_toml_reports_syntax_errors() {
        assert!(matches!(parse_toml("key = "), Err(SourceError::Toml(_))));
    }

    #[test]
    fn test_parse_json() {
        let map = parse_json(r#"{"items": [{"id": 1}]}"#).unwrap();
        assert_eq!(map["items"].as_array().unwrap().len(), 1);
        assert!(matches!(parse_json("{"), Err(SourceError::Json(_))));
    }

    #[test]
    fn test_parse_json_requires_object() {
        let err = parse_json("[1, 2]").unwrap_err();
        assert!(matches!(err, SourceError::NotAnObject(_)));
        assert_eq!(err.to_string(), "expected an object at the top level, got [1, 2]");
    }
}
