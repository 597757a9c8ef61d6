//! Document driver
//!
//! [`Migrator`] bundles a registry, a fallback policy and options, and turns
//! whole legacy documents into Lexical documents. It holds no per-document
//! state, so a single instance can convert any number of documents, from
//! any number of threads.

use serde_json::Value;

use crate::config::ConvertOptions;
use crate::converters::Converter;
use crate::error::ConvertResult;
use crate::node::{SourceDocument, TargetDocument};
use crate::registry::Registry;
use crate::transform::{ConversionStats, Diagnostic, Fallback, UnknownPlaceholder, Walker};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// =============================================================================
// Conversion
// =============================================================================

/// A converted document with the record of how it was produced.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: TargetDocument,
    /// One entry per unsupported node, in document order
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ConversionStats,
}

impl Conversion {
    /// Check whether every node had a registered converter.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_document(self) -> TargetDocument {
        self.document
    }
}

// =============================================================================
// Migrator
// =============================================================================

/// Entry point for converting legacy documents.
///
/// # Example
///
/// ```ignore
/// let migrator = Migrator::new()
///     .register(CalloutConverter)
///     .with_fallback(DropUnsupported);
///
/// let conversion = migrator.convert(&SourceDocument::from_json(json)?)?;
/// for diagnostic in &conversion.diagnostics {
///     eprintln!("{diagnostic}");
/// }
/// ```
pub struct Migrator {
    registry: Registry,
    fallback: Box<dyn Fallback>,
    options: ConvertOptions,
}

impl Migrator {
    /// Create a migrator with the built-in converters, the placeholder
    /// fallback and default options.
    pub fn new() -> Self {
        Self::with_registry(Registry::with_defaults())
    }

    /// Create a migrator around an existing registry.
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            fallback: Box::new(UnknownPlaceholder),
            options: ConvertOptions::default(),
        }
    }

    /// Register an extra converter (builder pattern).
    pub fn register<C: Converter + 'static>(mut self, converter: C) -> Self {
        self.registry.register(converter);
        self
    }

    /// Replace the fallback policy.
    pub fn with_fallback<F: Fallback + 'static>(mut self, fallback: F) -> Self {
        self.fallback = Box::new(fallback);
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert one document.
    ///
    /// All or nothing: on error no partial document is returned.
    pub fn convert(&self, source: &SourceDocument) -> ConvertResult<Conversion> {
        let mut walker = Walker::new(&self.registry, self.fallback.as_ref(), &self.options);
        let document = walker.convert_document(source)?;
        let (diagnostics, stats) = walker.finish();

        tracing::debug!(
            nodes = document.node_count(),
            converted = stats.converted,
            placeholders = stats.placeholders,
            dropped = stats.dropped,
            max_depth = stats.max_depth,
            "converted document"
        );

        Ok(Conversion {
            document,
            diagnostics,
            stats,
        })
    }

    /// Convert a JSON document (bare state or legacy envelope) to JSON.
    pub fn convert_value(&self, source: &Value) -> ConvertResult<Value> {
        let source = SourceDocument::from_value(source)?;
        self.convert(&source)?.document.to_value()
    }

    /// Convert a JSON string to a JSON string.
    pub fn convert_str(&self, source: &str) -> ConvertResult<String> {
        let source = SourceDocument::from_json(source)?;
        self.convert(&source)?.document.to_json()
    }

    /// Convert many documents with the same registry.
    ///
    /// Results are in input order; one failing document does not affect the
    /// others. Runs in parallel with the `parallel` feature.
    pub fn convert_batch(&self, sources: &[SourceDocument]) -> Vec<ConvertResult<Conversion>> {
        #[cfg(feature = "parallel")]
        let results = sources.par_iter().map(|doc| self.convert(doc)).collect();

        #[cfg(not(feature = "parallel"))]
        let results = sources.iter().map(|doc| self.convert(doc)).collect();

        results
    }
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Migrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migrator")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Convert a document with the built-in converters and default settings.
pub fn convert_document(source: &SourceDocument) -> ConvertResult<TargetDocument> {
    Migrator::new().convert(source).map(Conversion::into_document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConvertError, NodeError};
    use crate::node::{SourceNode, TargetNode};
    use crate::transform::{ConvertContext, DropUnsupported, FallbackAction};
    use compact_str::CompactString;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Migrator: Send, Sync);
    assert_impl_all!(Conversion: Send, Sync);

    fn doc(children: Value) -> SourceDocument {
        SourceDocument::from_value(&json!({ "root": { "children": children } })).unwrap()
    }

    #[test]
    fn test_heading_scenario() {
        let source = doc(json!([
            { "type": "heading", "level": 2, "children": [{ "type": "text", "value": "Hi" }] }
        ]));
        let out = convert_document(&source).unwrap();

        assert_eq!(
            out.to_value().unwrap(),
            json!({ "root": {
                "type": "root", "version": 1,
                "direction": "ltr", "format": "", "indent": 0,
                "children": [{
                    "type": "heading", "version": 1, "tag": "h2",
                    "direction": "ltr", "format": "", "indent": 0,
                    "children": [{
                        "type": "text", "version": 1,
                        "text": "Hi", "value": "Hi",
                        "format": 0, "detail": 0, "mode": "normal", "style": "",
                    }],
                }],
            } })
        );
    }

    #[test]
    fn test_ordered_list_scenario() {
        let source = doc(json!([{
            "type": "list", "ordered": true, "children": [
                { "type": "list-item", "depth": 7, "children": [
                    { "type": "text", "text": "outer" },
                    { "type": "list", "ordered": false, "children": [
                        { "type": "list-item", "children": [{ "type": "text", "text": "inner" }] },
                    ] },
                ] },
            ],
        }]));
        let out = convert_document(&source).unwrap();

        let list = &out.children()[0];
        assert_eq!(list.get_str("listType"), Some("number"));
        assert_eq!(list.get_str("tag"), Some("ol"));

        let item = &list.child_nodes()[0];
        assert_eq!(item.node_type, "listitem");
        assert_eq!(item.get_u64("indent"), Some(0));
        assert!(item.get("depth").is_none());

        let inner = &item.child_nodes()[1].child_nodes()[0];
        assert_eq!(inner.get_u64("indent"), Some(1));
    }

    #[test]
    fn test_unsupported_node_scenario() {
        let source = doc(json!([
            { "type": "paragraph", "children": [{ "text": "before" }] },
            { "type": "custom-widget", "config": { "a": 1 } },
            { "type": "paragraph", "children": [{ "text": "after" }] },
        ]));

        let conversion = Migrator::new().convert(&source).unwrap();
        let types: Vec<_> = conversion.document.children().iter().map(|n| n.node_type.as_str()).collect();
        assert_eq!(types, vec!["paragraph", "unknownConverted", "paragraph"]);
        assert!(!conversion.is_clean());
        assert_eq!(conversion.diagnostics[0].node_type, "custom-widget");
        assert_eq!(conversion.diagnostics[0].action, FallbackAction::Placeholder);

        let conversion = Migrator::new().with_fallback(DropUnsupported).convert(&source).unwrap();
        let types: Vec<_> = conversion.document.children().iter().map(|n| n.node_type.as_str()).collect();
        assert_eq!(types, vec!["paragraph", "paragraph"]);
        assert_eq!(conversion.stats.dropped, 1);
    }

    #[test]
    fn test_malformed_node_scenario() {
        let source = doc(json!([
            { "type": "paragraph", "children": [{ "text": "fine" }] },
            { "type": "heading", "children": [{ "text": "no level" }] },
        ]));

        match convert_document(&source) {
            Err(ConvertError::MalformedNode { path, source }) => {
                assert_eq!(path.to_string(), "root > heading");
                assert_eq!(source, NodeError::missing("heading", "level"));
            }
            other => panic!("expected MalformedNode, got {other:?}"),
        }
    }

    #[test]
    fn test_root_attributes() {
        let source = SourceDocument::from_value(&json!({
            "root": { "type": "root", "direction": "rtl", "format": "center", "indent": 1, "children": [] }
        }))
        .unwrap();
        let out = convert_document(&source).unwrap();
        assert_eq!(out.root.get_str("direction"), Some("rtl"));
        assert_eq!(out.root.get_str("format"), Some("center"));
        assert_eq!(out.root.get_u64("indent"), Some(1));

        let migrator = Migrator::new().with_options(ConvertOptions::new().with_direction("rtl"));
        let out = migrator.convert(&SourceDocument::default()).unwrap();
        assert_eq!(out.document.root.get_str("direction"), Some("rtl"));
        assert_eq!(out.document.root.children, Some(Vec::new()));
    }

    #[test]
    fn test_convert_value_accepts_envelope() {
        let envelope = json!({
            "jsonContent": { "root": { "children": [
                { "type": "paragraph", "children": [{ "text": "wrapped" }] }
            ] } },
            "preview": "wrapped",
            "characters": 7,
            "words": 1,
        });
        let out = Migrator::new().convert_value(&envelope).unwrap();
        assert_eq!(out["root"]["children"][0]["children"][0]["text"], json!("wrapped"));

        let err = Migrator::new().convert_value(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidDocument(_)));
    }

    #[test]
    fn test_convert_str() {
        let out = Migrator::new()
            .convert_str(r#"{"root":{"children":[{"type":"hr"}]}}"#)
            .unwrap();
        assert_eq!(
            out,
            r#"{"root":{"type":"root","version":1,"children":[{"type":"horizontalrule","version":1}],"direction":"ltr","format":"","indent":0}}"#
        );

        let err = Migrator::new().convert_str("{not json").unwrap_err();
        assert!(matches!(err, ConvertError::Json(_)));
    }

    #[test]
    fn test_convert_batch_keeps_order() {
        let sources = vec![
            doc(json!([{ "type": "paragraph", "children": [{ "text": "one" }] }])),
            doc(json!([{ "type": "heading" }])),
            doc(json!([{ "type": "quote", "children": [{ "text": "three" }] }])),
        ];
        let results = Migrator::new().convert_batch(&sources);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().document.children()[0].node_type, "paragraph");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().document.children()[0].node_type, "quote");
    }

    #[test]
    fn test_custom_converter_is_dispatched() {
        struct CalloutConverter;

        impl Converter for CalloutConverter {
            fn node_types(&self) -> &[&'static str] {
                &["callout"]
            }

            fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
                CompactString::const_new("quote")
            }

            fn convert(
                &self,
                node: &SourceNode,
                children: Option<Vec<TargetNode>>,
                cx: &ConvertContext<'_>,
            ) -> Result<TargetNode, NodeError> {
                let tone = node.attrs.get("tone").cloned().unwrap_or(Value::Null);
                Ok(TargetNode::new("quote", 1)
                    .with("tone", tone)
                    .with("under", cx.parent_type)
                    .with_children(children.unwrap_or_default()))
            }
        }

        let source = doc(json!([
            { "type": "callout", "tone": "warning", "children": [{ "text": "careful" }] }
        ]));
        let conversion = Migrator::new().register(CalloutConverter).convert(&source).unwrap();
        let callout = &conversion.document.children()[0];

        assert_eq!(callout.get_str("tone"), Some("warning"));
        assert_eq!(callout.get_str("under"), Some("root"));
        assert_eq!(callout.child_nodes()[0].node_type, "text");
        assert!(conversion.is_clean());
    }

    #[test]
    fn test_depth_option() {
        let mut node = SourceNode::text("deep");
        for _ in 0..10 {
            node = SourceNode::new("quote").child(node);
        }
        let source = SourceDocument::new([node]);

        assert!(Migrator::new().convert(&source).is_ok());

        let shallow = Migrator::new().with_options(ConvertOptions::new().with_max_depth(4));
        let err = shallow.convert(&source).unwrap_err();
        assert!(matches!(err, ConvertError::DepthExceeded { limit: 4, .. }));
        assert_eq!(err.path().map(|p| p.depth()), Some(5));
    }
}
