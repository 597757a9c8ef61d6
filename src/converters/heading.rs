//! Heading converter: `heading`.

use compact_str::{CompactString, format_compact};
use serde_json::Value;

use crate::error::NodeError;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{HEADING_TYPE, HEADING_VERSION};

use super::{Converter, element_fields};

// =============================================================================
// HeadingConverter
// =============================================================================

/// Headings map their level onto Lexical's `h1`..`h6` tag.
pub struct HeadingConverter;

impl Converter for HeadingConverter {
    fn node_types(&self) -> &[&'static str] {
        &["heading"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(HEADING_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        let level = heading_level(node)?;

        Ok(TargetNode::new(HEADING_TYPE, HEADING_VERSION)
            .with_fields(element_fields(node, &["level", "tag"]))
            .with("tag", format_compact!("h{level}").as_str())
            .with_children(children.unwrap_or_default()))
    }
}

// =============================================================================
// Level parsing
// =============================================================================

/// Heading level from `level` (number or numeric string), falling back to a
/// legacy `tag` such as `"h2"`.
pub fn heading_level(node: &SourceNode) -> Result<u8, NodeError> {
    let node_type = node.type_tag();

    let level = match node.get_attr("level") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(Value::Null) | None => {
            return match node.get_attr("tag").and_then(Value::as_str) {
                Some(tag) => level_from_tag(tag)
                    .ok_or_else(|| NodeError::invalid(node_type, "tag", format!("expected h1..h6, found {tag:?}"))),
                None => Err(NodeError::missing(node_type, "level")),
            };
        }
        Some(other) => {
            return Err(NodeError::invalid(node_type, "level", format!("expected a number, found {other}")));
        }
    };

    match level {
        Some(l @ 1..=6) => Ok(l as u8),
        Some(l) => Err(NodeError::invalid(node_type, "level", format!("expected 1..=6, found {l}"))),
        None => Err(NodeError::invalid(node_type, "level", "expected a whole number")),
    }
}

/// Parse level from tag name: "h1" → 1
pub fn level_from_tag(tag: &str) -> Option<u8> {
    let digit = tag.trim().strip_prefix(['h', 'H'])?;
    match digit.parse::<u8>().ok()? {
        l @ 1..=6 => Some(l),
        _ => None,
    }
}
