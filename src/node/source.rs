//! Source node type
//!
//! Nodes of the legacy editor's serialized tree. They are read-only inputs:
//! the engine never mutates them.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attr::Fields;

/// Type tag assumed for nodes serialized without one (bare text runs).
pub const IMPLICIT_TYPE: &str = "text";

// =============================================================================
// SourceNode
// =============================================================================

/// Node in the legacy document tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    /// Type discriminator; absent for bare text runs
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<CompactString>,
    /// Child nodes, absent for leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SourceNode>>,
    /// Type-specific attributes
    #[serde(flatten)]
    pub attrs: Fields,
}

impl SourceNode {
    /// Create a node with a type tag and no children
    pub fn new(node_type: impl Into<CompactString>) -> Self {
        Self {
            node_type: Some(node_type.into()),
            children: None,
            attrs: Fields::new(),
        }
    }

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::new("text").attr("text", content.into())
    }

    /// Type tag used for registry lookup
    #[inline]
    pub fn type_tag(&self) -> &str {
        self.node_type.as_deref().unwrap_or(IMPLICIT_TYPE)
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Children as a slice (empty when absent)
    pub fn child_nodes(&self) -> &[SourceNode] {
        self.children.as_deref().unwrap_or_default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder API
    // ─────────────────────────────────────────────────────────────────────────

    /// Set an attribute (builder pattern)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append a child (builder pattern)
    pub fn child(mut self, node: SourceNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(node);
        self
    }

    /// Replace the children (builder pattern)
    pub fn with_children(mut self, children: impl IntoIterator<Item = SourceNode>) -> Self {
        self.children = Some(children.into_iter().collect());
        self
    }
}
