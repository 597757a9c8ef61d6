//! Conversion context handed to every converter call.

use compact_str::CompactString;

use crate::node::TargetDocument;
use crate::registry::Registry;
use crate::version::{LIST_TYPE, ROOT_TYPE};

static ROOT_ANCESTRY: [CompactString; 1] = [CompactString::const_new(ROOT_TYPE)];

/// Read-only view of where a node sits in the tree being built.
///
/// Built by the walker for each node; converters use it for
/// position-dependent rules (list nesting, parent legality).
#[derive(Clone, Copy)]
pub struct ConvertContext<'a> {
    /// The full registry
    pub registry: &'a Registry,
    /// Destination type of the parent node
    pub parent_type: &'a str,
    /// Position among the source siblings
    pub child_index: usize,
    /// Destination types of all ancestors, document root first
    pub ancestors: &'a [CompactString],
    nested: &'a [(&'static str, TargetDocument)],
}

impl<'a> ConvertContext<'a> {
    /// Context for a node under the given ancestry.
    ///
    /// An empty ancestry is treated as sitting directly under the root.
    pub fn new(registry: &'a Registry, ancestors: &'a [CompactString], child_index: usize) -> Self {
        let ancestors = if ancestors.is_empty() { &ROOT_ANCESTRY[..] } else { ancestors };
        Self {
            registry,
            parent_type: ancestors.last().map_or(ROOT_TYPE, CompactString::as_str),
            child_index,
            ancestors,
            nested: &[],
        }
    }

    /// Context for a top-level node.
    pub fn top_level(registry: &'a Registry, child_index: usize) -> Self {
        Self::new(registry, &ROOT_ANCESTRY, child_index)
    }

    /// Attach editor states converted on behalf of the node.
    pub(crate) fn with_nested(mut self, nested: &'a [(&'static str, TargetDocument)]) -> Self {
        self.nested = nested;
        self
    }

    /// Converted nested editor state stored under `field`.
    pub fn nested(&self, field: &str) -> Option<&'a TargetDocument> {
        self.nested
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, doc)| doc)
    }

    /// Number of enclosing `list` nodes.
    pub fn list_depth(&self) -> usize {
        self.ancestors.iter().filter(|t| t.as_str() == LIST_TYPE).count()
    }

    /// Nesting depth of the node within its document (top-level nodes are 1).
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Check whether any ancestor has the given destination type.
    pub fn has_ancestor(&self, node_type: &str) -> bool {
        self.ancestors.iter().any(|t| t.as_str() == node_type)
    }
}

impl std::fmt::Debug for ConvertContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvertContext")
            .field("parent_type", &self.parent_type)
            .field("child_index", &self.child_index)
            .field("ancestors", &self.ancestors)
            .finish_non_exhaustive()
    }
}
