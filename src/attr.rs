//! Attribute access for source and target nodes
//!
//! Node attributes are plain JSON maps. `FieldsExt` adds the typed lookups
//! converters need, and `require_*` variants that turn an absent attribute
//! into a [`NodeError`] naming the node type and field.

use serde_json::{Map, Value};

use crate::error::NodeError;

/// Node attributes as an ordered JSON object
pub type Fields = Map<String, Value>;

/// Keys owned by the node structs themselves; never stored as attributes.
pub const RESERVED_KEYS: [&str; 3] = ["type", "version", "children"];

/// Extension trait for attribute operations on Fields
pub trait FieldsExt {
    /// Get a string attribute
    fn get_str(&self, name: &str) -> Option<&str>;

    /// Get a boolean attribute
    fn get_bool(&self, name: &str) -> Option<bool>;

    /// Get a non-negative integer attribute
    fn get_u64(&self, name: &str) -> Option<u64>;

    /// Get an object attribute
    fn get_object(&self, name: &str) -> Option<&Fields>;

    /// Get an array attribute
    fn get_array(&self, name: &str) -> Option<&Vec<Value>>;

    /// Get an attribute that is present and not `null`
    fn get_present(&self, name: &str) -> Option<&Value>;

    /// Get a string attribute or fail with `MissingField`
    fn require_str(&self, node_type: &str, name: &'static str) -> Result<&str, NodeError> {
        self.get_str(name)
            .ok_or_else(|| NodeError::missing(node_type, name))
    }

    /// Get a present attribute or fail with `MissingField`
    fn require(&self, node_type: &str, name: &'static str) -> Result<&Value, NodeError> {
        self.get_present(name)
            .ok_or_else(|| NodeError::missing(node_type, name))
    }
}

impl FieldsExt for Fields {
    fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_u64)
    }

    fn get_object(&self, name: &str) -> Option<&Fields> {
        self.get(name).and_then(Value::as_object)
    }

    fn get_array(&self, name: &str) -> Option<&Vec<Value>> {
        self.get(name).and_then(Value::as_array)
    }

    fn get_present(&self, name: &str) -> Option<&Value> {
        self.get(name).filter(|v| !v.is_null())
    }
}

/// Copy `source` without reserved keys and without the legacy keys a
/// converter has already consumed.
pub fn carry_over(source: &Fields, consumed: &[&str]) -> Fields {
    source
        .iter()
        .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()) && !consumed.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Read an identifier that may be a string or a number.
pub fn as_id(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) if !s.is_empty() => Some(value.clone()),
        Value::Number(_) => Some(value.clone()),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("fixture must be an object"),
        }
    }

    #[test]
    fn test_typed_getters() {
        let f = fields(json!({
            "url": "https://example.com",
            "newTab": true,
            "start": 3,
            "attributes": { "rel": "noopener" },
            "ids": ["a", "b"],
            "nothing": null,
        }));

        assert_eq!(f.get_str("url"), Some("https://example.com"));
        assert_eq!(f.get_bool("newTab"), Some(true));
        assert_eq!(f.get_u64("start"), Some(3));
        assert_eq!(f.get_object("attributes").and_then(|a| a.get_str("rel")), Some("noopener"));
        assert_eq!(f.get_array("ids").map(Vec::len), Some(2));

        // Wrong type or null reads as absent
        assert_eq!(f.get_str("start"), None);
        assert!(f.get_present("nothing").is_none());
        assert!(f.get_present("missing").is_none());
    }

    #[test]
    fn test_require_reports_node_and_field() {
        let f = fields(json!({ "tag": "h2" }));
        let err = f.require_str("heading", "level").unwrap_err();
        assert_eq!(err, NodeError::missing("heading", "level"));
        assert_eq!(f.require_str("heading", "tag").unwrap(), "h2");
    }

    #[test]
    fn test_carry_over_strips_reserved_and_consumed() {
        let f = fields(json!({
            "version": 1,
            "level": 2,
            "direction": "rtl",
            "custom": { "keep": true },
        }));
        let carried = carry_over(&f, &["level"]);

        assert!(!carried.contains_key("version"));
        assert!(!carried.contains_key("level"));
        assert_eq!(carried.get_str("direction"), Some("rtl"));
        assert!(carried.contains_key("custom"));
    }

    #[test]
    fn test_as_id() {
        assert_eq!(as_id(&json!("abc")), Some(json!("abc")));
        assert_eq!(as_id(&json!(42)), Some(json!(42)));
        assert_eq!(as_id(&json!("")), None);
        assert_eq!(as_id(&json!(null)), None);
    }
}
