//! Quote converter: `quote`, `blockquote`.

use compact_str::CompactString;

use crate::error::NodeError;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{QUOTE_TYPE, QUOTE_VERSION};

use super::{Converter, element_fields, unwrap_paragraphs};

/// Block quotes. Lexical quotes hold inline content, so paragraph children
/// are flattened into the quote.
pub struct QuoteConverter;

impl Converter for QuoteConverter {
    fn node_types(&self) -> &[&'static str] {
        &["quote", "blockquote"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(QUOTE_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        Ok(TargetNode::new(QUOTE_TYPE, QUOTE_VERSION)
            .with_fields(element_fields(node, &[]))
            .with_children(unwrap_paragraphs(children.unwrap_or_default())))
    }
}
