// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Closed representation of decoded response data.
//!
//! Response bodies are loosely typed, so instead of threading
//! `serde_json::Value` through the engine every stage works against
//! [`PathValue`]. Traversal code matches on the variants explicitly and
//! never assumes a schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Decoded response data.
///
/// Mapping keys are unique. Insertion order is kept so that a decoded body
/// serializes back in the order it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<PathValue>),
    Mapping(IndexMap<String, PathValue>),
}

impl PathValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PathValue::Null)
    }

    /// Returns the member stored under `key` when `self` is a mapping.
    pub fn get(&self, key: &str) -> Option<&PathValue> {
        match self {
            PathValue::Mapping(members) => members.get(key),
            _ => None,
        }
    }

    /// Returns the element at `index` when `self` is a sequence.
    pub fn get_index(&self, index: usize) -> Option<&PathValue> {
        match self {
            PathValue::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PathValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PathValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PathValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Short name of the variant, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            PathValue::Null => "null",
            PathValue::Bool(_) => "bool",
            PathValue::Number(_) => "number",
            PathValue::String(_) => "string",
            PathValue::Sequence(_) => "sequence",
            PathValue::Mapping(_) => "mapping",
        }
    }
}

impl From<Value> for PathValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => PathValue::Null,
            Value::Bool(b) => PathValue::Bool(b),
            Value::Number(n) => PathValue::Number(n),
            Value::String(s) => PathValue::String(s),
            Value::Array(items) => {
                PathValue::Sequence(items.into_iter().map(PathValue::from).collect())
            }
            Value::Object(members) => PathValue::Mapping(
                members
                    .into_iter()
                    .map(|(k, v)| (k, PathValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<PathValue> for Value {
    fn from(value: PathValue) -> Self {
        match value {
            PathValue::Null => Value::Null,
            PathValue::Bool(b) => Value::Bool(b),
            PathValue::Number(n) => Value::Number(n),
            PathValue::String(s) => Value::String(s),
            PathValue::Sequence(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            PathValue::Mapping(members) => Value::Object(
                members
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for PathValue {
    fn from(value: &str) -> Self {
        PathValue::String(value.to_string())
    }
}

impl From<String> for PathValue {
    fn from(value: String) -> Self {
        PathValue::String(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PathValue {
                fn from(value: $ty) -> Self {
                    PathValue::Number(value.into())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64);

impl From<bool> for PathValue {
    fn from(value: bool) -> Self {
        PathValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_value_nested() {
        let value = PathValue::from(json!({"a": {"b": [1, "two", null, true]}}));

        let list = value.get("a").and_then(|a| a.get("b")).unwrap();
        assert_eq!(list.get_index(0).and_then(PathValue::as_i64), Some(1));
        assert_eq!(list.get_index(1).and_then(PathValue::as_str), Some("two"));
        assert!(list.get_index(2).unwrap().is_null());
        assert_eq!(list.get_index(3), Some(&PathValue::Bool(true)));
        assert_eq!(list.get_index(4), None);
    }

    #[test]
    fn test_mapping_preserves_insertion_order() {
        let value: PathValue = serde_json::from_str(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"z":1,"a":2,"m":3}"#
        );
    }

    #[test]
    fn test_get_on_non_mapping_is_none() {
        assert_eq!(PathValue::from("text").get("a"), None);
        assert_eq!(PathValue::Null.get("a"), None);
        assert_eq!(PathValue::from(5).get_index(0), None);
    }

    #[test]
    fn test_untagged_deserialization_picks_variants() {
        let value: PathValue = serde_json::from_str(r#"[null, 1.5, "s", {"k": false}]"#).unwrap();
        let PathValue::Sequence(items) = value else {
            panic!("expected sequence");
        };
        assert_eq!(items[0].kind(), "null");
        assert_eq!(items[1].as_f64(), Some(1.5));
        assert_eq!(items[2].kind(), "string");
        assert_eq!(items[3].kind(), "mapping");
    }

    #[test]
    fn test_convert_back_to_json_value() {
        let original = json!({"price": 12.5, "tags": ["a", "b"], "ok": true, "none": null});
        let back = Value::from(PathValue::from(original.clone()));
        assert_eq!(back, original);
    }
}
