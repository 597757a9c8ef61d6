//! Handling of source nodes no converter is registered for.
//!
//! Unsupported content is never an error. The [`Fallback`] policy decides
//! whether a node becomes an inert placeholder or disappears, and the walker
//! records a [`Diagnostic`] either way.

use std::fmt;

use compact_str::CompactString;
use serde::Serialize;
use serde_json::{Value, json};

use crate::node::{NodePath, SourceNode, TargetNode};
use crate::version::{UNKNOWN_TYPE, UNKNOWN_VERSION};

use super::ConvertContext;

// =============================================================================
// Fallback
// =============================================================================

/// Policy for source nodes without a registered converter.
pub trait Fallback: Send + Sync {
    /// Destination type of the placeholder, `None` to drop the node.
    ///
    /// A dropped node's subtree is not walked.
    fn placeholder_type(&self, node: &SourceNode) -> Option<CompactString>;

    /// Build the placeholder for a kept node.
    fn placeholder(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        cx: &ConvertContext<'_>,
    ) -> TargetNode;
}

/// Keep unsupported nodes as `unknownConverted` placeholders holding the raw
/// legacy node, so the content can be recovered later.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownPlaceholder;

impl Fallback for UnknownPlaceholder {
    fn placeholder_type(&self, _node: &SourceNode) -> Option<CompactString> {
        Some(CompactString::const_new(UNKNOWN_TYPE))
    }

    fn placeholder(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> TargetNode {
        let node_data =
            serde_json::to_value(node).unwrap_or_else(|_| Value::Object(node.attrs.clone()));

        TargetNode::new(UNKNOWN_TYPE, UNKNOWN_VERSION)
            .with("data", json!({ "nodeType": node.type_tag(), "nodeData": node_data }))
            .with("direction", "ltr")
            .with("format", "")
            .with("indent", 0)
            .with_children(children.unwrap_or_default())
    }
}

/// Silently remove unsupported nodes (and their subtrees).
#[derive(Debug, Clone, Copy, Default)]
pub struct DropUnsupported;

impl Fallback for DropUnsupported {
    fn placeholder_type(&self, _node: &SourceNode) -> Option<CompactString> {
        None
    }

    fn placeholder(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        cx: &ConvertContext<'_>,
    ) -> TargetNode {
        UnknownPlaceholder.placeholder(node, children, cx)
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// What the fallback did with an unsupported node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackAction {
    Placeholder,
    Dropped,
}

impl fmt::Display for FallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Placeholder => "placeholder",
            Self::Dropped => "dropped",
        })
    }
}

/// Record of one fallback decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Path to the unsupported node
    pub path: NodePath,
    /// Its source type tag
    pub node_type: CompactString,
    pub action: FallbackAction,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported node `{}` at {}: {}", self.node_type, self.path, self.action)
    }
}
