//! Walker: SourceNode tree → TargetNode tree
//!
//! Post-order traversal of a legacy tree:
//! 1. Resolves the converter for each node by its type tag
//! 2. Converts the node's children first, under the node's destination type
//! 3. Migrates embedded editor states the converter declares
//! 4. Hands everything to the converter (or the fallback policy)
//!
//! Sibling order is preserved. Nodes dropped by the fallback leave no trace
//! in the output besides a [`Diagnostic`].

use compact_str::CompactString;
use serde_json::Value;
use smallvec::{SmallVec, smallvec};

use crate::attr::{Fields, FieldsExt};
use crate::config::ConvertOptions;
use crate::converters::Converter;
use crate::error::{ConvertError, ConvertResult, NodeError};
use crate::format::element_alignment;
use crate::node::{NodePath, SourceDocument, SourceNode, SourceRoot, TargetDocument, TargetNode};
use crate::registry::Registry;
use crate::version::{ROOT_TYPE, ROOT_VERSION};

use super::{ConvertContext, Diagnostic, Fallback, FallbackAction, UnknownPlaceholder};

// =============================================================================
// ConversionStats
// =============================================================================

/// Counters collected while walking one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Nodes built by a registered converter
    pub converted: usize,
    /// Unsupported nodes kept as placeholders
    pub placeholders: usize,
    /// Unsupported nodes dropped with their subtree
    pub dropped: usize,
    /// Deepest nesting level reached below the root
    pub max_depth: usize,
}

impl ConversionStats {
    /// Number of unsupported nodes encountered.
    pub fn unsupported(&self) -> usize {
        self.placeholders + self.dropped
    }
}

// =============================================================================
// Walker
// =============================================================================

/// Recursive converter dispatch for one document.
pub struct Walker<'a> {
    registry: &'a Registry,
    fallback: &'a dyn Fallback,
    options: &'a ConvertOptions,
    /// Source tags from the root to the node being converted
    path: NodePath,
    /// Destination types of the enclosing nodes
    ancestry: SmallVec<[CompactString; 8]>,
    diagnostics: Vec<Diagnostic>,
    stats: ConversionStats,
}

impl<'a> Walker<'a> {
    /// Create a walker positioned at the document root.
    pub fn new(registry: &'a Registry, fallback: &'a dyn Fallback, options: &'a ConvertOptions) -> Self {
        Self {
            registry,
            fallback,
            options,
            path: NodePath::root(),
            ancestry: smallvec![CompactString::const_new(ROOT_TYPE)],
            diagnostics: Vec::new(),
            stats: ConversionStats::default(),
        }
    }

    /// Position the walker under a node of the given destination type.
    ///
    /// Only the destination ancestry seen by converters changes. Reported
    /// paths stay source paths and start at `root`.
    pub fn under(mut self, parent_type: &str) -> Self {
        if parent_type != ROOT_TYPE {
            self.ancestry.push(CompactString::from(parent_type));
        }
        self
    }

    /// Fallback decisions taken so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Counters collected so far.
    pub fn stats(&self) -> ConversionStats {
        self.stats
    }

    /// Consume the walker, returning its diagnostics and counters.
    pub fn finish(self) -> (Vec<Diagnostic>, ConversionStats) {
        (self.diagnostics, self.stats)
    }

    /// Convert a whole document.
    pub fn convert_document(&mut self, doc: &SourceDocument) -> ConvertResult<TargetDocument> {
        Ok(TargetDocument {
            root: self.convert_root(&doc.root)?,
        })
    }

    /// Build the output root from a source root.
    ///
    /// Children are converted as top-level nodes whatever the walker's
    /// current position; the path keeps growing so nested documents still
    /// count towards the depth limit.
    pub fn convert_root(&mut self, root: &SourceRoot) -> ConvertResult<TargetNode> {
        let outer = std::mem::replace(
            &mut self.ancestry,
            smallvec![CompactString::const_new(ROOT_TYPE)],
        );
        let children = self.walk(&root.children);
        self.ancestry = outer;

        Ok(root_node(&root.attrs, children?, &self.options.direction))
    }

    /// Convert sibling nodes in order.
    pub fn walk(&mut self, nodes: &[SourceNode]) -> ConvertResult<Vec<TargetNode>> {
        let mut out = Vec::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if let Some(converted) = self.convert_node(node, index)? {
                out.push(converted);
            }
        }
        Ok(out)
    }

    /// Convert one node; `None` if the fallback dropped it.
    fn convert_node(&mut self, node: &SourceNode, index: usize) -> ConvertResult<Option<TargetNode>> {
        self.path.push(node.type_tag());
        let result = self.dispatch(node, index);
        self.path.pop();
        result
    }

    fn dispatch(&mut self, node: &SourceNode, index: usize) -> ConvertResult<Option<TargetNode>> {
        let depth = self.path.depth();
        if depth > self.options.max_depth {
            return Err(ConvertError::DepthExceeded {
                limit: self.options.max_depth,
                path: self.path.clone(),
            });
        }
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let registry = self.registry;
        match registry.get(node.type_tag()) {
            Some(converter) => self.apply(converter, node, index).map(Some),
            None => self.apply_fallback(node, index),
        }
    }

    fn apply(
        &mut self,
        converter: &dyn Converter,
        node: &SourceNode,
        index: usize,
    ) -> ConvertResult<TargetNode> {
        let target_type = converter.target_type(node, self.parent_type());
        let children = self.walk_children(node, target_type)?;
        let nested = self.convert_nested(node, converter.nested_states(node))?;

        let cx = ConvertContext::new(self.registry, &self.ancestry, index).with_nested(&nested);
        let converted = converter
            .convert(node, children, &cx)
            .map_err(|source| self.malformed(source))?;

        self.stats.converted += 1;
        Ok(converted)
    }

    fn apply_fallback(&mut self, node: &SourceNode, index: usize) -> ConvertResult<Option<TargetNode>> {
        let Some(placeholder_type) = self.fallback.placeholder_type(node) else {
            self.record(node, FallbackAction::Dropped);
            return Ok(None);
        };
        self.record(node, FallbackAction::Placeholder);

        let children = self.walk_children(node, placeholder_type)?;
        let cx = ConvertContext::new(self.registry, &self.ancestry, index);
        Ok(Some(self.fallback.placeholder(node, children, &cx)))
    }

    /// Convert the children of `node` under its destination type.
    fn walk_children(
        &mut self,
        node: &SourceNode,
        target_type: CompactString,
    ) -> ConvertResult<Option<Vec<TargetNode>>> {
        let Some(children) = node.children.as_deref() else {
            return Ok(None);
        };

        self.ancestry.push(target_type);
        let result = self.walk(children);
        self.ancestry.pop();
        result.map(Some)
    }

    /// Migrate embedded editor states as documents of their own.
    fn convert_nested(
        &mut self,
        node: &SourceNode,
        states: Vec<(&'static str, &Value)>,
    ) -> ConvertResult<Vec<(&'static str, TargetDocument)>> {
        let mut nested = Vec::with_capacity(states.len());
        for (field, state) in states {
            let doc = SourceDocument::from_value(state).map_err(|e| {
                self.malformed(NodeError::invalid(node.type_tag(), field, e.to_string()))
            })?;

            self.path.push(ROOT_TYPE);
            let root = self.convert_root(&doc.root);
            self.path.pop();

            nested.push((field, TargetDocument { root: root? }));
        }
        Ok(nested)
    }

    fn record(&mut self, node: &SourceNode, action: FallbackAction) {
        tracing::warn!(
            node_type = node.type_tag(),
            path = %self.path,
            %action,
            "no converter registered for node type"
        );

        match action {
            FallbackAction::Placeholder => self.stats.placeholders += 1,
            FallbackAction::Dropped => self.stats.dropped += 1,
        }
        self.diagnostics.push(Diagnostic {
            path: self.path.clone(),
            node_type: CompactString::from(node.type_tag()),
            action,
        });
    }

    fn malformed(&self, source: NodeError) -> ConvertError {
        ConvertError::MalformedNode {
            path: self.path.clone(),
            source,
        }
    }

    fn parent_type(&self) -> &str {
        self.ancestry.last().map_or(ROOT_TYPE, CompactString::as_str)
    }
}

/// Output root with its direction, format and indent defaults.
fn root_node(attrs: &Fields, children: Vec<TargetNode>, default_direction: &str) -> TargetNode {
    let direction = match attrs.get_str("direction") {
        Some(dir @ ("ltr" | "rtl")) => dir,
        _ => default_direction,
    };

    TargetNode::new(ROOT_TYPE, ROOT_VERSION)
        .with("direction", direction)
        .with("format", element_alignment(attrs))
        .with("indent", attrs.get_u64("indent").unwrap_or(0))
        .with_children(children)
}

// =============================================================================
// Free function
// =============================================================================

/// Convert a sibling sequence placed under `parent_type`, with the
/// placeholder fallback and default options.
pub fn walk(nodes: &[SourceNode], parent_type: &str, registry: &Registry) -> ConvertResult<Vec<TargetNode>> {
    let options = ConvertOptions::default();
    Walker::new(registry, &UnknownPlaceholder, &options)
        .under(parent_type)
        .walk(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::DropUnsupported;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn nest(tag: &str, levels: usize) -> SourceNode {
        let mut node = SourceNode::text("deep");
        for _ in 0..levels {
            node = SourceNode::new(tag).child(node);
        }
        node
    }

    #[test]
    fn test_walk_preserves_order() {
        let registry = Registry::with_defaults();
        let nodes = vec![SourceNode::text("a"), SourceNode::text("b"), SourceNode::text("c")];
        let out = walk(&nodes, "paragraph", &registry).unwrap();

        let texts: Vec<_> = out.iter().filter_map(|n| n.get_str("text")).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_walk_under_code_parent() {
        let registry = Registry::with_defaults();
        let out = walk(&[SourceNode::text("fn")], "code", &registry).unwrap();
        assert_eq!(out[0].node_type, "code-highlight");
    }

    #[test]
    fn test_walk_under_keeps_source_path() {
        let registry = Registry::with_defaults();
        let options = ConvertOptions::default();
        let mut walker = Walker::new(&registry, &UnknownPlaceholder, &options).under("paragraph");

        walker.walk(&[SourceNode::new("emoji")]).unwrap();
        assert_eq!(walker.diagnostics()[0].path.to_string(), "root > emoji");

        let err = walk(&[SourceNode::new("heading")], "list", &registry).unwrap_err();
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("root > heading"));
    }

    #[test]
    fn test_walk_empty() {
        let registry = Registry::with_defaults();
        assert!(walk(&[], "root", &registry).unwrap().is_empty());
    }

    #[test]
    fn test_depth_limit() {
        let registry = Registry::with_defaults();
        let options = ConvertOptions::new().with_max_depth(3);

        // quote > quote > text: three levels, accepted
        let mut walker = Walker::new(&registry, &UnknownPlaceholder, &options);
        assert!(walker.walk(&[nest("quote", 2)]).is_ok());
        assert_eq!(walker.stats().max_depth, 3);

        // one more level fails, naming the first node past the limit
        let mut walker = Walker::new(&registry, &UnknownPlaceholder, &options);
        let err = walker.walk(&[nest("quote", 3)]).unwrap_err();
        match err {
            ConvertError::DepthExceeded { limit, path } => {
                assert_eq!(limit, 3);
                assert_eq!(path.to_string(), "root > quote > quote > quote > text");
            }
            other => panic!("expected DepthExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_node_path() {
        let registry = Registry::with_defaults();
        let options = ConvertOptions::default();
        let mut walker = Walker::new(&registry, &UnknownPlaceholder, &options);

        let list = SourceNode::new("list")
            .attr("listType", "bullet")
            .child(SourceNode::new("listitem").child(SourceNode::new("heading")));
        let err = walker.walk(&[list]).unwrap_err();

        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("root > list > listitem > heading"));
        assert_eq!(err.node_error(), Some(&NodeError::missing("heading", "level")));
    }

    #[test]
    fn test_fallback_records_diagnostics() {
        let registry = Registry::with_defaults();
        let options = ConvertOptions::default();

        let nodes = vec![
            SourceNode::new("paragraph").child(SourceNode::new("emoji").attr("name", "wave")),
            SourceNode::new("poll").child(SourceNode::text("inside")),
        ];

        let mut walker = Walker::new(&registry, &UnknownPlaceholder, &options);
        let out = walker.walk(&nodes).unwrap();
        assert_eq!(out[0].child_nodes()[0].node_type, "unknownConverted");
        assert_eq!(out[1].child_nodes()[0].node_type, "text");

        let (diagnostics, stats) = walker.finish();
        let paths: Vec<_> = diagnostics.iter().map(|d| d.path.to_string()).collect();
        assert_eq!(paths, vec!["root > paragraph > emoji", "root > poll"]);
        assert_eq!(stats.placeholders, 2);
        assert_eq!(stats.converted, 2);

        let mut walker = Walker::new(&registry, &DropUnsupported, &options);
        let out = walker.walk(&nodes).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].child_nodes().is_empty());
        assert_eq!(walker.stats().dropped, 2);
        assert!(walker.diagnostics().iter().all(|d| d.action == FallbackAction::Dropped));
    }

    #[test]
    fn test_list_values_skip_dropped_siblings() {
        let registry = Registry::with_defaults();
        let options = ConvertOptions::default();
        let list = SourceNode::new("list")
            .attr("listType", "number")
            .attr("start", 5)
            .child(SourceNode::new("listitem").child(SourceNode::text("a")))
            .child(SourceNode::new("poll"))
            .child(SourceNode::new("listitem").child(SourceNode::text("b")));

        let mut walker = Walker::new(&registry, &DropUnsupported, &options);
        let out = walker.walk(std::slice::from_ref(&list)).unwrap();
        let values: Vec<_> = out[0].child_nodes().iter().map(|n| n.get_u64("value")).collect();
        assert_eq!(values, vec![Some(5), Some(6)]);

        let mut walker = Walker::new(&registry, &UnknownPlaceholder, &options);
        let out = walker.walk(&[list]).unwrap();
        let values: Vec<_> = out[0].child_nodes().iter().map(|n| n.get_u64("value")).collect();
        assert_eq!(values, vec![Some(5), None, Some(6)]);
    }

    #[test]
    fn test_nested_caption_is_converted() {
        let registry = Registry::with_defaults();
        let options = ConvertOptions::default();
        let mut walker = Walker::new(&registry, &UnknownPlaceholder, &options);

        let upload = SourceNode::new("upload")
            .attr("rawImagePayload", json!({ "relationTo": "media", "value": { "id": "m1" } }))
            .attr(
                "caption",
                json!({ "editorState": { "root": { "children": [
                    { "type": "paragraph", "children": [{ "text": "A cat", "bold": true }] }
                ] } } }),
            );
        let out = walker.walk(&[upload]).unwrap();

        let caption = &out[0].get("fields").unwrap()["caption"];
        assert_eq!(caption["root"]["type"], json!("root"));
        assert_eq!(caption["root"]["children"][0]["type"], json!("paragraph"));
        assert_eq!(caption["root"]["children"][0]["children"][0]["format"], json!(1));
        assert_eq!(walker.stats().converted, 3);
    }

    #[test]
    fn test_nested_caption_errors_carry_host_path() {
        let registry = Registry::with_defaults();
        let options = ConvertOptions::default();
        let mut walker = Walker::new(&registry, &UnknownPlaceholder, &options);

        let upload = SourceNode::new("upload")
            .attr("relationTo", "media")
            .attr("value", "m1")
            .attr("caption", json!({ "editorState": { "root": { "children": [{ "type": "heading" }] } } }));
        let err = walker.walk(&[upload]).unwrap_err();
        assert_eq!(
            err.path().map(ToString::to_string).as_deref(),
            Some("root > upload > root > heading")
        );

        let upload = SourceNode::new("upload")
            .attr("relationTo", "media")
            .attr("value", "m1")
            .attr("caption", json!({ "editorState": "not a document" }));
        let err = walker.walk(&[upload]).unwrap_err();
        assert_eq!(err.node_error().map(NodeError::field), Some("caption"));
    }

    #[test]
    fn test_root_node_defaults() {
        let root = root_node(&Fields::new(), Vec::new(), "rtl");
        assert_eq!(
            serde_json::to_value(&root).unwrap(),
            json!({ "type": "root", "version": 1, "children": [], "direction": "rtl", "format": "", "indent": 0 })
        );
    }
}
