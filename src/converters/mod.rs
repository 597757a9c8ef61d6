//! Built-in converters for the legacy node types.
//!
//! Each converter handles one family of source tags and builds the matching
//! Lexical node from the source node plus its already converted children.
//! They implement the same `Converter` trait as caller-supplied converters.
//!
//! # Available Converters
//!
//! - `ParagraphConverter` - `paragraph`
//! - `TextConverter` / `TabConverter` - `text` (and untyped runs), `tab`
//! - `HeadingConverter` - `heading`
//! - `QuoteConverter` - `quote`, `blockquote`
//! - `ListConverter` / `ListItemConverter` - `list`, `listitem`
//! - `LinkConverter` - `link`, `autolink`
//! - `MarkConverter` - `mark`
//! - `UploadConverter` / `RelationshipConverter` - `upload`, `relationship`
//! - `TableConverter` / `TableRowConverter` / `TableCellConverter` - tables
//! - `CodeConverter` - `code`
//! - `HorizontalRuleConverter` / `LineBreakConverter` - leaves

use std::sync::Arc;

use compact_str::CompactString;
use serde_json::Value;

use crate::attr::{Fields, FieldsExt, carry_over};
use crate::error::NodeError;
use crate::format::element_alignment;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{
    LINE_BREAK_TYPE, LINE_BREAK_VERSION, PARAGRAPH_TYPE, PARAGRAPH_VERSION, is_inline,
};

pub mod code;
pub mod heading;
pub mod leaf;
pub mod link;
pub mod list;
pub mod mark;
pub mod paragraph;
pub mod quote;
pub mod relationship;
pub mod table;
pub mod text;
pub mod upload;

pub use code::CodeConverter;
pub use heading::HeadingConverter;
pub use leaf::{HorizontalRuleConverter, LineBreakConverter};
pub use link::LinkConverter;
pub use list::{ListConverter, ListItemConverter, ListType};
pub use mark::MarkConverter;
pub use paragraph::ParagraphConverter;
pub use quote::QuoteConverter;
pub use relationship::RelationshipConverter;
pub use table::{HeaderState, TableCellConverter, TableConverter, TableRowConverter};
pub use text::{TabConverter, TextConverter};
pub use upload::UploadConverter;

// =============================================================================
// Converter
// =============================================================================

/// Converts one family of source nodes into Lexical nodes.
///
/// Implementations must be pure functions of their inputs. The walker owns
/// recursion; a converter only ever sees children that are already converted.
pub trait Converter: Send + Sync {
    /// Source type tags this converter handles.
    fn node_types(&self) -> &[&'static str];

    /// Destination type of `node` when placed under `parent_type`.
    ///
    /// Called before the children are converted: the result is the
    /// `parent_type` the children will see.
    fn target_type(&self, node: &SourceNode, parent_type: &str) -> CompactString;

    /// Embedded editor states stored in the node's attributes that must be
    /// migrated as documents of their own.
    ///
    /// Returned values are parsed like top-level documents; the converted
    /// results are available through [`ConvertContext::nested`].
    fn nested_states<'a>(&self, _node: &'a SourceNode) -> Vec<(&'static str, &'a Value)> {
        Vec::new()
    }

    /// Build the destination node.
    ///
    /// `children` is `None` when the source node has no children field,
    /// `Some` (possibly empty) otherwise.
    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError>;
}

/// Built-in converter set, one instance per converter.
pub fn builtin() -> Vec<Arc<dyn Converter>> {
    vec![
        Arc::new(ParagraphConverter),
        Arc::new(TextConverter),
        Arc::new(TabConverter),
        Arc::new(HeadingConverter),
        Arc::new(QuoteConverter),
        Arc::new(ListConverter),
        Arc::new(ListItemConverter),
        Arc::new(LinkConverter),
        Arc::new(MarkConverter),
        Arc::new(UploadConverter),
        Arc::new(RelationshipConverter),
        Arc::new(TableConverter),
        Arc::new(TableRowConverter),
        Arc::new(TableCellConverter),
        Arc::new(CodeConverter),
        Arc::new(HorizontalRuleConverter),
        Arc::new(LineBreakConverter),
    ]
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Legacy keys folded into the element defaults.
const ELEMENT_KEYS: [&str; 4] = ["direction", "format", "indent", "align"];

/// Carried-over attributes plus Lexical element defaults
/// (`direction`, `format`, `indent`).
pub(crate) fn element_fields(node: &SourceNode, consumed: &[&str]) -> Fields {
    let mut fields = carry_over(&node.attrs, consumed);
    for key in ELEMENT_KEYS {
        fields.remove(key);
    }

    let direction = match node.attrs.get_str("direction") {
        Some(dir @ ("ltr" | "rtl")) => dir,
        _ => "ltr",
    };
    fields.insert("direction".into(), direction.into());
    fields.insert("format".into(), element_alignment(&node.attrs).into());
    fields.insert("indent".into(), node.attrs.get_u64("indent").unwrap_or(0).into());
    fields
}

/// Replace paragraph children by their own children.
///
/// Lexical quotes and list items hold inline content directly. Consecutive
/// paragraphs are separated by a `linebreak`.
pub(crate) fn unwrap_paragraphs(children: Vec<TargetNode>) -> Vec<TargetNode> {
    let mut out = Vec::with_capacity(children.len());
    let mut after_paragraph = false;
    for child in children {
        if child.node_type == PARAGRAPH_TYPE {
            if after_paragraph {
                out.push(TargetNode::new(LINE_BREAK_TYPE, LINE_BREAK_VERSION));
            }
            out.extend(child.children.unwrap_or_default());
            after_paragraph = true;
        } else {
            out.push(child);
            after_paragraph = false;
        }
    }
    out
}

/// Group consecutive inline children into paragraphs, keeping block children.
///
/// Returns a single empty paragraph for empty input.
pub(crate) fn wrap_inline_runs(children: Vec<TargetNode>) -> Vec<TargetNode> {
    fn paragraph(run: Vec<TargetNode>) -> TargetNode {
        TargetNode::new(PARAGRAPH_TYPE, PARAGRAPH_VERSION)
            .with("direction", "ltr")
            .with("format", "")
            .with("indent", 0)
            .with_children(run)
    }

    let mut out = Vec::new();
    let mut run = Vec::new();
    for child in children {
        if is_inline(&child.node_type) {
            run.push(child);
        } else {
            if !run.is_empty() {
                out.push(paragraph(std::mem::take(&mut run)));
            }
            out.push(child);
        }
    }
    if !run.is_empty() || out.is_empty() {
        out.push(paragraph(run));
    }
    out
}
