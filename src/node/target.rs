//! Target node type
//!
//! Nodes of the Lexical serialized tree. Every node is freshly built by a
//! converter from converted children plus remapped attributes.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attr::{Fields, FieldsExt, RESERVED_KEYS};

// =============================================================================
// TargetNode
// =============================================================================

/// Node in the Lexical document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetNode {
    /// Destination node kind
    #[serde(rename = "type")]
    pub node_type: CompactString,
    /// Schema version of the node kind
    pub version: u32,
    /// Child nodes, omitted for leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TargetNode>>,
    /// Type-specific fields
    #[serde(flatten)]
    pub fields: Fields,
}

impl TargetNode {
    /// Create a leaf node
    pub fn new(node_type: impl Into<CompactString>, version: u32) -> Self {
        Self {
            node_type: node_type.into(),
            version,
            children: None,
            fields: Fields::new(),
        }
    }

    /// Set the children (builder pattern)
    pub fn with_children(mut self, children: Vec<TargetNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Set a field (builder pattern)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Merge fields; reserved keys are skipped (builder pattern)
    pub fn with_fields(mut self, fields: Fields) -> Self {
        for (k, v) in fields {
            if !RESERVED_KEYS.contains(&k.as_str()) {
                self.fields.insert(k, v);
            }
        }
        self
    }

    /// Set a field. Reserved keys (`type`, `version`, `children`) are ignored
    /// so a field can never shadow the node's own structure.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        if RESERVED_KEYS.contains(&name.as_str()) {
            return;
        }
        self.fields.insert(name, value.into());
    }

    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a string field
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get_str(name)
    }

    /// Get an integer field
    pub fn get_u64(&self, name: &str) -> Option<u64> {
        self.fields.get_u64(name)
    }

    /// Children as a slice (empty for leaves)
    pub fn child_nodes(&self) -> &[TargetNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Check whether the node has no children field
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Iterate this node and all descendants in pre-order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

// =============================================================================
// Descendants
// =============================================================================

/// Pre-order iterator over a target subtree
pub struct Descendants<'a> {
    stack: Vec<&'a TargetNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a TargetNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.child_nodes().iter().rev());
        Some(node)
    }
}
