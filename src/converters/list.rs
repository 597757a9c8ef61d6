//! List converters: `list` and `listitem`.
//!
//! Legacy lists describe their kind in one of three ways (`listType`, an
//! `ordered` flag or an HTML-ish `tag`). A list numbers its converted items
//! from its `start`; items take their `indent` from how many lists enclose
//! them. Whatever value or depth the legacy plugin stored is ignored.

use std::fmt;

use compact_str::CompactString;
use serde_json::Value;

use crate::attr::FieldsExt;
use crate::error::NodeError;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{LIST_ITEM_TYPE, LIST_ITEM_VERSION, LIST_TYPE, LIST_VERSION};

use super::{Converter, element_fields, unwrap_paragraphs};

// =============================================================================
// ListType
// =============================================================================

/// Kind of a Lexical list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListType {
    Number,
    Bullet,
    Check,
}

impl ListType {
    /// Parse a Lexical `listType` value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "number" => Some(Self::Number),
            "bullet" => Some(Self::Bullet),
            "check" => Some(Self::Check),
            _ => None,
        }
    }

    /// Lexical `listType` value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Bullet => "bullet",
            Self::Check => "check",
        }
    }

    /// HTML tag Lexical stores next to the list type.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Number => "ol",
            Self::Bullet | Self::Check => "ul",
        }
    }

    /// Resolve the list type of a legacy list node.
    pub fn from_source(node: &SourceNode) -> Result<Self, NodeError> {
        let attrs = &node.attrs;

        if let Some(name) = attrs.get_str("listType") {
            return Self::from_name(name).ok_or_else(|| {
                NodeError::invalid(
                    node.type_tag(),
                    "listType",
                    format!("expected number, bullet or check, found {name:?}"),
                )
            });
        }

        match attrs.get_present("ordered") {
            Some(Value::Bool(true)) => return Ok(Self::Number),
            Some(Value::Bool(false)) => return Ok(Self::Bullet),
            Some(other) => {
                return Err(NodeError::invalid(
                    node.type_tag(),
                    "ordered",
                    format!("expected a boolean, found {other}"),
                ));
            }
            None => {}
        }

        match attrs.get_str("tag") {
            Some("ol") => Ok(Self::Number),
            Some("ul") => Ok(Self::Bullet),
            _ => Err(NodeError::missing(node.type_tag(), "ordered")),
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ListConverter
// =============================================================================

pub struct ListConverter;

impl Converter for ListConverter {
    fn node_types(&self) -> &[&'static str] {
        &["list"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(LIST_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        let list_type = ListType::from_source(node)?;
        let start = node.attrs.get_u64("start").unwrap_or(1);

        Ok(TargetNode::new(LIST_TYPE, LIST_VERSION)
            .with_fields(element_fields(node, &["listType", "ordered", "tag", "start"]))
            .with("listType", list_type.as_str())
            .with("tag", list_type.tag())
            .with("start", start)
            .with_children(number_items(children.unwrap_or_default(), start)))
    }
}

/// Number `listitem` children consecutively from `start`.
///
/// Other children (placeholders for unsupported nodes) are skipped.
fn number_items(mut children: Vec<TargetNode>, start: u64) -> Vec<TargetNode> {
    let items = children
        .iter_mut()
        .filter(|child| child.node_type == LIST_ITEM_TYPE);
    for (value, item) in (start..).zip(items) {
        item.set("value", value);
    }
    children
}

// =============================================================================
// ListItemConverter
// =============================================================================

pub struct ListItemConverter;

impl Converter for ListItemConverter {
    fn node_types(&self) -> &[&'static str] {
        &["listitem", "list-item"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(LIST_ITEM_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        let indent = cx.list_depth().saturating_sub(1);

        // renumbered by the enclosing list
        let mut out = TargetNode::new(LIST_ITEM_TYPE, LIST_ITEM_VERSION)
            .with_fields(element_fields(node, &["value", "checked", "depth"]))
            .with("indent", indent)
            .with("value", 1)
            .with_children(unwrap_paragraphs(children.unwrap_or_default()));

        if let Some(checked) = node.attrs.get_bool("checked") {
            out.set("checked", checked);
        }
        Ok(out)
    }
}
