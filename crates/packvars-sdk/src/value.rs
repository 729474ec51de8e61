//! Typed variable values
//!
//! [`VariableValue`] is the value model produced by the configuration parser.
//! It is richer than JSON or TOML: a value may be `Unknown` (declared but not
//! yet resolvable) and floats may be non-finite. Those cases are what make
//! conversion to generic representations fallible.

use std::collections::BTreeMap;
use std::fmt;

/// A typed value held by a [`Variable`](crate::Variable).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum VariableValue {
    #[default]
    Null,
    /// A value that could not be resolved at parse time.
    Unknown,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<VariableValue>),
    Map(BTreeMap<String, VariableValue>),
}

impl VariableValue {
    pub fn is_null(&self) -> bool {
        matches!(self, VariableValue::Null)
    }

    /// Whether this value, and everything nested in it, is known.
    pub fn is_known(&self) -> bool {
        match self {
            VariableValue::Unknown => false,
            VariableValue::List(items) => items.iter().all(VariableValue::is_known),
            VariableValue::Map(entries) => entries.values().all(VariableValue::is_known),
            _ => true,
        }
    }

    /// Render as a TOML value for override files.
    ///
    /// Returns `None` when TOML cannot hold the value: nulls, unknowns,
    /// non-finite floats, or a list or map containing one of those.
    pub fn to_toml(&self) -> Option<toml::Value> {
        match self {
            VariableValue::Null | VariableValue::Unknown => None,
            VariableValue::Bool(b) => Some(toml::Value::Boolean(*b)),
            VariableValue::Integer(i) => Some(toml::Value::Integer(*i)),
            VariableValue::Float(f) if f.is_finite() => Some(toml::Value::Float(*f)),
            VariableValue::Float(_) => None,
            VariableValue::String(s) => Some(toml::Value::String(s.clone())),
            VariableValue::List(items) => items
                .iter()
                .map(VariableValue::to_toml)
                .collect::<Option<Vec<_>>>()
                .map(toml::Value::Array),
            VariableValue::Map(entries) => entries
                .iter()
                .map(|(k, v)| v.to_toml().map(|v| (k.clone(), v)))
                .collect::<Option<toml::Table>>()
                .map(toml::Value::Table),
        }
    }

    /// Build from a parsed TOML value. Datetimes are kept as strings.
    pub fn from_toml(value: &toml::Value) -> Self {
        match value {
            toml::Value::String(s) => VariableValue::String(s.clone()),
            toml::Value::Integer(i) => VariableValue::Integer(*i),
            toml::Value::Float(f) => VariableValue::Float(*f),
            toml::Value::Boolean(b) => VariableValue::Bool(*b),
            toml::Value::Datetime(dt) => VariableValue::String(dt.to_string()),
            toml::Value::Array(items) => {
                VariableValue::List(items.iter().map(VariableValue::from_toml).collect())
            }
            toml::Value::Table(entries) => VariableValue::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), VariableValue::from_toml(v)))
                    .collect(),
            ),
        }
    }

    /// Build from a JSON value. Numbers that fit `i64` stay integers.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => VariableValue::Null,
            serde_json::Value::Bool(b) => VariableValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => VariableValue::Integer(i),
                None => VariableValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => VariableValue::String(s.clone()),
            serde_json::Value::Array(items) => {
                VariableValue::List(items.iter().map(VariableValue::from_json).collect())
            }
            serde_json::Value::Object(entries) => VariableValue::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), VariableValue::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for VariableValue {
    fn from(b: bool) -> Self {
        VariableValue::Bool(b)
    }
}

impl From<i32> for VariableValue {
    fn from(i: i32) -> Self {
        VariableValue::Integer(i64::from(i))
    }
}

impl From<i64> for VariableValue {
    fn from(i: i64) -> Self {
        VariableValue::Integer(i)
    }
}

impl From<f64> for VariableValue {
    fn from(f: f64) -> Self {
        VariableValue::Float(f)
    }
}

impl From<&str> for VariableValue {
    fn from(s: &str) -> Self {
        VariableValue::String(s.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(s: String) -> Self {
        VariableValue::String(s)
    }
}

/// Declared type constraint of a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariableType {
    Any,
    Bool,
    Number,
    String,
    List(Box<VariableType>),
    Map(Box<VariableType>),
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableType::Any => write!(f, "any"),
            VariableType::Bool => write!(f, "bool"),
            VariableType::Number => write!(f, "number"),
            VariableType::String => write!(f, "string"),
            VariableType::List(inner) => write!(f, "list({})", inner),
            VariableType::Map(inner) => write!(f, "map({})", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_known_looks_inside_collections() {
        assert!(VariableValue::from(1).is_known());
        assert!(!VariableValue::Unknown.is_known());
        assert!(!VariableValue::List(vec![1.into(), VariableValue::Unknown]).is_known());
        let map = BTreeMap::from([("a".to_string(), VariableValue::Unknown)]);
        assert!(!VariableValue::Map(map).is_known());
    }

    #[test]
    fn test_to_toml_rejects_unwritable_values() {
        assert_eq!(VariableValue::Null.to_toml(), None);
        assert_eq!(VariableValue::Float(f64::INFINITY).to_toml(), None);
        assert_eq!(
            VariableValue::List(vec!["a".into(), VariableValue::Null]).to_toml(),
            None
        );
    }

    #[test]
    fn test_to_toml_nested() {
        let value = VariableValue::Map(BTreeMap::from([
            ("port".to_string(), VariableValue::from(8080)),
            (
                "hosts".to_string(),
                VariableValue::List(vec!["a".into(), "b".into()]),
            ),
        ]));
        let toml = value.to_toml().unwrap();
        assert_eq!(toml["port"].as_integer(), Some(8080));
        assert_eq!(toml["hosts"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_from_json_keeps_integers() {
        let json = serde_json::json!({"n": 3, "f": 1.5, "s": "x", "z": null});
        let value = VariableValue::from_json(&json);
        let VariableValue::Map(map) = value else {
            panic!("expected map");
        };
        assert_eq!(map["n"], VariableValue::Integer(3));
        assert_eq!(map["f"], VariableValue::Float(1.5));
        assert_eq!(map["s"], VariableValue::from("x"));
        assert_eq!(map["z"], VariableValue::Null);
    }

    #[test]
    fn test_type_display() {
        let ty = VariableType::Map(Box::new(VariableType::List(Box::new(VariableType::String))));
        assert_eq!(ty.to_string(), "map(list(string))");
    }
}
