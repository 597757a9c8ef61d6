//! Text converters: `text` (including untyped runs) and `tab`.
//!
//! Formatting is folded into the Lexical bitmask (see [`TextFormat`]).
//! Inside a `code` block, text runs become `code-highlight` nodes.

use compact_str::CompactString;
use serde_json::Value;

use crate::attr::{Fields, FieldsExt, carry_over};
use crate::error::NodeError;
use crate::format::TextFormat;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{
    CODE_HIGHLIGHT_TYPE, CODE_HIGHLIGHT_VERSION, CODE_TYPE, TAB_TYPE, TAB_VERSION, TEXT_TYPE,
    TEXT_VERSION,
};

use super::Converter;

/// Lexical text modes.
const MODES: [&str; 3] = ["normal", "token", "segmented"];

/// Detail bit marking a text node as unmergeable (used by tabs).
const DETAIL_UNMERGEABLE: u64 = 2;

/// Keys rewritten by the text converters.
const TEXT_KEYS: [&str; 5] = ["text", "format", "detail", "mode", "style"];

fn text_parts<'a>(node: &'a SourceNode, text: &str, detail: u64) -> TextParts<'a> {
    let mut consumed: Vec<&str> = TextFormat::SOURCE_KEYS.to_vec();
    consumed.extend(TEXT_KEYS);

    let mode = node
        .attrs
        .get_str("mode")
        .filter(|m| MODES.contains(m))
        .unwrap_or("normal");

    TextParts {
        carried: carry_over(&node.attrs, &consumed),
        text: text.to_string(),
        format: TextFormat::from_fields(&node.attrs),
        detail,
        mode,
        style: node.attrs.get_str("style").unwrap_or(""),
    }
}

struct TextParts<'a> {
    carried: Fields,
    text: String,
    format: TextFormat,
    detail: u64,
    mode: &'a str,
    style: &'a str,
}

impl TextParts<'_> {
    fn build(self, node_type: &'static str, version: u32) -> TargetNode {
        TargetNode::new(node_type, version)
            .with_fields(self.carried)
            .with("text", self.text)
            .with("format", self.format.bits())
            .with("detail", self.detail)
            .with("mode", self.mode)
            .with("style", self.style)
    }
}

// =============================================================================
// TextConverter
// =============================================================================

/// Text runs; nodes without a `type` are routed here too.
pub struct TextConverter;

impl Converter for TextConverter {
    fn node_types(&self) -> &[&'static str] {
        &["text"]
    }

    fn target_type(&self, _node: &SourceNode, parent_type: &str) -> CompactString {
        if parent_type == CODE_TYPE {
            CompactString::const_new(CODE_HIGHLIGHT_TYPE)
        } else {
            CompactString::const_new(TEXT_TYPE)
        }
    }

    fn convert(
        &self,
        node: &SourceNode,
        _children: Option<Vec<TargetNode>>,
        cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        let text = node
            .attrs
            .get_str("text")
            .or_else(|| node.attrs.get_str("value"))
            .ok_or_else(|| NodeError::missing(node.type_tag(), "text"))?;
        let detail = node.attrs.get_u64("detail").unwrap_or(0);
        let parts = text_parts(node, text, detail);

        if cx.parent_type == CODE_TYPE {
            let highlight = node.attrs.get("highlightType").cloned().unwrap_or(Value::Null);
            Ok(parts
                .build(CODE_HIGHLIGHT_TYPE, CODE_HIGHLIGHT_VERSION)
                .with("highlightType", highlight))
        } else {
            Ok(parts.build(TEXT_TYPE, TEXT_VERSION))
        }
    }
}

// =============================================================================
// TabConverter
// =============================================================================

/// Tab characters, stored by Lexical as unmergeable text.
pub struct TabConverter;

impl Converter for TabConverter {
    fn node_types(&self) -> &[&'static str] {
        &["tab"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(TAB_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        _children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        Ok(text_parts(node, "\t", DETAIL_UNMERGEABLE).build(TAB_TYPE, TAB_VERSION))
    }
}
