//! Field value types used for name-addressed field access

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A polymorphic field value read from an entity by field name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    List(Vec<FieldValue>),
    Object(Value),
    Null,
}

impl FieldValue {
    /// Build a field value from its JSON rendering
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from_json).collect())
            }
            obj @ Value::Object(_) => FieldValue::Object(obj),
        }
    }

    /// Read a typed, possibly unset, field into a value
    ///
    /// Unset fields, and values that do not render as JSON, become `Null`.
    pub fn from_field<T: Serialize>(field: Option<&T>) -> Self {
        field
            .and_then(|v| serde_json::to_value(v).ok())
            .map(FieldValue::from_json)
            .unwrap_or(FieldValue::Null)
    }

    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// String form used when ordering entities by this field.
    ///
    /// An unset value orders as the empty string. Lists render as
    /// `[a, b]`, objects as compact JSON.
    pub fn sort_key(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::List(items) => {
                let inner: Vec<String> = items.iter().map(FieldValue::sort_key).collect();
                format!("[{}]", inner.join(", "))
            }
            FieldValue::Object(v) => v.to_string(),
            FieldValue::Null => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_from_field_unset_is_null() {
        let unset: Option<&String> = None;
        assert!(FieldValue::from_field(unset).is_null());
    }

    #[test]
    fn test_from_field_string() {
        let name = "openssl".to_string();
        let value = FieldValue::from_field(Some(&name));
        assert_eq!(value.as_string(), Some("openssl"));
        assert_eq!(value.as_integer(), None);
    }

    #[test]
    fn test_from_field_set_keeps_order() {
        let vendors: BTreeSet<String> = ["b".to_string(), "a".to_string()].into();
        let value = FieldValue::from_field(Some(&vendors));
        assert_eq!(
            value,
            FieldValue::List(vec![
                FieldValue::String("a".to_string()),
                FieldValue::String("b".to_string())
            ])
        );
        assert_eq!(value.sort_key(), "[a, b]");
    }

    #[test]
    fn test_sort_key_scalars() {
        assert_eq!(FieldValue::Integer(42).sort_key(), "42");
        assert_eq!(FieldValue::Boolean(true).sort_key(), "true");
        assert_eq!(FieldValue::Null.sort_key(), "");
    }

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(
            FieldValue::from_json(serde_json::json!(7)),
            FieldValue::Integer(7)
        );
        assert_eq!(
            FieldValue::from_json(serde_json::json!(1.5)),
            FieldValue::Float(1.5)
        );
    }

    #[test]
    fn test_from_json_object() {
        let value = FieldValue::from_json(serde_json::json!({"purl": "pkg:npm/x"}));
        assert!(matches!(value, FieldValue::Object(_)));
        assert_eq!(value.sort_key(), r#"{"purl":"pkg:npm/x"}"#);
    }
}
