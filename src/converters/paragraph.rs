//! Paragraph converter: `paragraph`.

use compact_str::CompactString;

use crate::error::NodeError;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{PARAGRAPH_TYPE, PARAGRAPH_VERSION};

use super::{Converter, element_fields};

/// Paragraphs keep their children and gain element defaults.
pub struct ParagraphConverter;

impl Converter for ParagraphConverter {
    fn node_types(&self) -> &[&'static str] {
        &["paragraph"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(PARAGRAPH_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        Ok(TargetNode::new(PARAGRAPH_TYPE, PARAGRAPH_VERSION)
            .with_fields(element_fields(node, &[]))
            .with_children(children.unwrap_or_default()))
    }
}
