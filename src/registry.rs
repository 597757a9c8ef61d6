//! Node-type registry
//!
//! Maps legacy type tags to the converter that handles them. The registry is
//! assembled up front and only read while documents are converted, so one
//! instance can be shared by any number of conversions.

use std::sync::Arc;

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::converters::{self, Converter};

/// Registry of node converters
///
/// # Examples
///
/// ```ignore
/// let mut registry = Registry::with_defaults();
/// registry.register(MyCalloutConverter);
///
/// let converter = registry.get("callout");
/// ```
#[derive(Clone)]
pub struct Registry {
    converters: FxHashMap<CompactString, Arc<dyn Converter>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            converters: FxHashMap::default(),
        }
    }

    /// Create a registry holding the built-in converters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for converter in converters::builtin() {
            registry.register_arc(converter);
        }
        registry
    }

    /// Register a converter under every tag it declares.
    ///
    /// Converters already registered under one of those tags are replaced.
    pub fn register<C: Converter + 'static>(&mut self, converter: C) -> &mut Self {
        self.register_arc(Arc::new(converter))
    }

    /// Register a shared converter under every tag it declares.
    pub fn register_arc(&mut self, converter: Arc<dyn Converter>) -> &mut Self {
        for &tag in converter.node_types() {
            self.converters
                .insert(CompactString::const_new(tag), Arc::clone(&converter));
        }
        self
    }

    /// Route an extra tag to the converter registered under `existing`.
    ///
    /// Returns `false` (and registers nothing) when `existing` is unknown.
    pub fn register_as(&mut self, tag: impl Into<CompactString>, existing: &str) -> bool {
        match self.converters.get(existing).cloned() {
            Some(converter) => {
                self.converters.insert(tag.into(), converter);
                true
            }
            None => false,
        }
    }

    /// Get the converter for a tag
    #[inline]
    pub fn get(&self, tag: &str) -> Option<&dyn Converter> {
        self.converters.get(tag).map(|c| c.as_ref())
    }

    /// Check if a tag has a converter
    #[inline]
    pub fn has(&self, tag: &str) -> bool {
        self.converters.contains_key(tag)
    }

    /// Remove the converter for a tag
    pub fn remove(&mut self, tag: &str) -> Option<Arc<dyn Converter>> {
        self.converters.remove(tag)
    }

    /// All registered tags (sorted)
    pub fn node_types(&self) -> Vec<&str> {
        let mut tags: Vec<_> = self.converters.keys().map(CompactString::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Number of registered tags
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("node_types", &self.node_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NodeError;
    use crate::node::{SourceNode, TargetNode};
    use crate::transform::ConvertContext;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Registry: Send, Sync, Clone);

    struct CalloutConverter;

    impl Converter for CalloutConverter {
        fn node_types(&self) -> &[&'static str] {
            &["callout"]
        }

        fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
            CompactString::const_new("callout")
        }

        fn convert(
            &self,
            _node: &SourceNode,
            children: Option<Vec<TargetNode>>,
            _cx: &ConvertContext<'_>,
        ) -> Result<TargetNode, NodeError> {
            Ok(TargetNode::new("callout", 1).with_children(children.unwrap_or_default()))
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.get("paragraph").is_none());
    }

    #[test]
    fn test_defaults_cover_builtin_tags() {
        let registry = Registry::with_defaults();
        for tag in [
            "paragraph", "text", "tab", "heading", "quote", "blockquote", "list", "listitem",
            "list-item", "link", "autolink", "mark", "upload", "relationship", "table",
            "tablerow", "table-row", "tablecell", "table-cell", "code", "horizontalrule",
            "horizontal-rule", "hr", "linebreak", "line-break",
        ] {
            assert!(registry.has(tag), "missing converter for {tag}");
        }
        assert_eq!(registry.len(), 25);
    }

    #[test]
    fn test_register_custom() {
        let mut registry = Registry::with_defaults();
        registry.register(CalloutConverter);

        assert!(registry.has("callout"));
        assert_eq!(registry.get("callout").map(|c| c.node_types()), Some(&["callout"][..]));
    }

    #[test]
    fn test_register_replaces_existing() {
        struct ShoutingParagraph;
        impl Converter for ShoutingParagraph {
            fn node_types(&self) -> &[&'static str] {
                &["paragraph"]
            }
            fn target_type(&self, _: &SourceNode, _: &str) -> CompactString {
                CompactString::const_new("heading")
            }
            fn convert(
                &self,
                _: &SourceNode,
                _: Option<Vec<TargetNode>>,
                _: &ConvertContext<'_>,
            ) -> Result<TargetNode, NodeError> {
                Ok(TargetNode::new("heading", 1).with("tag", "h1"))
            }
        }

        let mut registry = Registry::with_defaults();
        let before = registry.len();
        registry.register(ShoutingParagraph);

        assert_eq!(registry.len(), before);
        let converter = registry.get("paragraph").unwrap();
        assert_eq!(converter.target_type(&SourceNode::new("paragraph"), "root"), "heading");
    }

    #[test]
    fn test_register_as_and_remove() {
        let mut registry = Registry::with_defaults();

        assert!(registry.register_as("aside", "quote"));
        assert!(!registry.register_as("nope", "not-registered"));
        assert!(registry.has("aside"));
        assert!(!registry.has("nope"));

        assert!(registry.remove("aside").is_some());
        assert!(!registry.has("aside"));
    }

    #[test]
    fn test_node_types_sorted() {
        let mut registry = Registry::new();
        registry.register(CalloutConverter);
        registry.register_as("aside", "callout");
        assert_eq!(registry.node_types(), vec!["aside", "callout"]);
    }
}
