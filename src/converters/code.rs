//! Code block converter: `code`.
//!
//! Children see `code` as their parent type, so text runs inside come out of
//! [`TextConverter`](super::TextConverter) as `code-highlight` nodes.

use compact_str::CompactString;

use crate::attr::FieldsExt;
use crate::error::NodeError;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{CODE_TYPE, CODE_VERSION};

use super::{Converter, element_fields};

pub struct CodeConverter;

impl Converter for CodeConverter {
    fn node_types(&self) -> &[&'static str] {
        &["code"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(CODE_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        let mut out = TargetNode::new(CODE_TYPE, CODE_VERSION)
            .with_fields(element_fields(node, &["language"]))
            .with_children(children.unwrap_or_default());

        if let Some(language) = node.attrs.get_str("language") {
            out.set("language", language);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn test_code_language() {
        let registry = Registry::new();
        let cx = ConvertContext::top_level(&registry, 0);

        let out = CodeConverter
            .convert(&SourceNode::new("code").attr("language", "rust"), Some(Vec::new()), &cx)
            .unwrap();
        assert_eq!(out.get_str("language"), Some("rust"));

        let out = CodeConverter.convert(&SourceNode::new("code"), None, &cx).unwrap();
        assert!(out.get("language").is_none());
        assert_eq!(out.children, Some(Vec::new()));
    }
}
