//! Document types
//!
//! The root containers for source and target trees.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attr::Fields;
use crate::error::{ConvertError, ConvertResult};

use super::{SourceNode, TargetNode};

/// Key of the legacy plugin envelope wrapping the editor state.
pub const ENVELOPE_KEY: &str = "jsonContent";

// =============================================================================
// SourceDocument
// =============================================================================

/// Legacy editor state: `{ "root": { "children": [...], ... } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub root: SourceRoot,
}

/// Root node of a legacy editor state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRoot {
    /// Top-level nodes
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<SourceNode>,
    /// Root attributes (direction, format, indent, ...)
    #[serde(flatten)]
    pub attrs: Fields,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<SourceNode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<SourceNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SourceDocument {
    /// Create a document from top-level nodes
    pub fn new(children: impl IntoIterator<Item = SourceNode>) -> Self {
        Self {
            root: SourceRoot {
                children: children.into_iter().collect(),
                attrs: Fields::new(),
            },
        }
    }

    /// Parse a document from JSON.
    ///
    /// Accepts the bare editor state (`{ "root": ... }`) as well as the legacy
    /// plugin envelope (`{ "jsonContent": { "root": ... }, "preview": ... }`).
    /// A missing root reads as an empty document.
    pub fn from_value(value: &Value) -> ConvertResult<Self> {
        let Value::Object(map) = value else {
            return Err(ConvertError::invalid_document(format!(
                "expected a JSON object, found {}",
                json_kind(value)
            )));
        };

        let state = match map.get(ENVELOPE_KEY) {
            Some(inner @ Value::Object(_)) => inner,
            Some(Value::Null) | None => value,
            Some(other) => {
                return Err(ConvertError::invalid_document(format!(
                    "`{ENVELOPE_KEY}` must be an object, found {}",
                    json_kind(other)
                )));
            }
        };

        Ok(Self::deserialize(state)?)
    }

    /// Parse a document from a JSON string
    pub fn from_json(json: &str) -> ConvertResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// TargetDocument
// =============================================================================

/// Lexical editor state: `{ "root": { "type": "root", ... } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDocument {
    pub root: TargetNode,
}

impl TargetDocument {
    /// Top-level nodes
    pub fn children(&self) -> &[TargetNode] {
        self.root.child_nodes()
    }

    /// Total number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.root.descendants().count()
    }

    /// Serialize to a JSON value
    pub fn to_value(&self) -> ConvertResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> ConvertResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
