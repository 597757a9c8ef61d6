//! Table converters: `table`, `tablerow`, `tablecell`.
//!
//! Lexical table cells are block containers: inline content must sit in a
//! paragraph, and a cell always holds at least one paragraph.

use std::ops::BitOr;

use compact_str::CompactString;
use serde_json::Value;

use crate::attr::FieldsExt;
use crate::error::NodeError;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{
    TABLE_CELL_TYPE, TABLE_CELL_VERSION, TABLE_ROW_TYPE, TABLE_ROW_VERSION, TABLE_TYPE,
    TABLE_VERSION,
};

use super::{Converter, element_fields, wrap_inline_runs};

// =============================================================================
// HeaderState
// =============================================================================

/// Header flags of a table cell, as Lexical's `headerState` bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HeaderState(u8);

impl HeaderState {
    pub const NONE: Self = Self(0);
    pub const ROW: Self = Self(1);
    pub const COLUMN: Self = Self(2);
    pub const BOTH: Self = Self(3);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits; unknown bits are discarded.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self((bits & 0b11) as u8)
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parse a legacy `header` attribute.
    pub fn from_header(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(true) => Some(Self::ROW),
            Value::Bool(false) => Some(Self::NONE),
            Value::String(s) => match s.as_str() {
                "row" => Some(Self::ROW),
                "column" => Some(Self::COLUMN),
                "both" => Some(Self::BOTH),
                "none" | "" => Some(Self::NONE),
                _ => None,
            },
            _ => None,
        }
    }

    fn from_source(node: &SourceNode) -> Result<Self, NodeError> {
        if let Some(bits) = node.attrs.get_u64("headerState") {
            return Ok(Self::from_bits(bits));
        }
        match node.attrs.get_present("header") {
            None => Ok(Self::NONE),
            Some(header) => Self::from_header(header).ok_or_else(|| {
                NodeError::invalid(
                    node.type_tag(),
                    "header",
                    format!("expected a boolean, row, column or both, found {header}"),
                )
            }),
        }
    }
}

impl BitOr for HeaderState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// =============================================================================
// TableConverter
// =============================================================================

pub struct TableConverter;

impl Converter for TableConverter {
    fn node_types(&self) -> &[&'static str] {
        &["table"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(TABLE_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        Ok(TargetNode::new(TABLE_TYPE, TABLE_VERSION)
            .with_fields(element_fields(node, &[]))
            .with_children(children.unwrap_or_default()))
    }
}

// =============================================================================
// TableRowConverter
// =============================================================================

pub struct TableRowConverter;

impl Converter for TableRowConverter {
    fn node_types(&self) -> &[&'static str] {
        &["tablerow", "table-row"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(TABLE_ROW_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        let mut out = TargetNode::new(TABLE_ROW_TYPE, TABLE_ROW_VERSION)
            .with_fields(element_fields(node, &["height"]))
            .with_children(children.unwrap_or_default());

        if let Some(height) = node.attrs.get("height").filter(|h| h.is_number()) {
            out.set("height", height.clone());
        }
        Ok(out)
    }
}

// =============================================================================
// TableCellConverter
// =============================================================================

pub struct TableCellConverter;

impl Converter for TableCellConverter {
    fn node_types(&self) -> &[&'static str] {
        &["tablecell", "table-cell"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(TABLE_CELL_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        let header = HeaderState::from_source(node)?;
        let attrs = &node.attrs;

        let mut out = TargetNode::new(TABLE_CELL_TYPE, TABLE_CELL_VERSION)
            .with_fields(element_fields(
                node,
                &["headerState", "header", "colSpan", "rowSpan", "width", "backgroundColor"],
            ))
            .with("headerState", header.bits())
            .with("colSpan", attrs.get_u64("colSpan").unwrap_or(1))
            .with("rowSpan", attrs.get_u64("rowSpan").unwrap_or(1))
            .with_children(wrap_inline_runs(children.unwrap_or_default()));

        if let Some(width) = attrs.get("width").filter(|w| w.is_number()) {
            out.set("width", width.clone());
        }
        if let Some(color) = attrs.get_str("backgroundColor") {
            out.set("backgroundColor", color);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use serde_json::json;

    fn cell(node: SourceNode, children: Option<Vec<TargetNode>>) -> Result<TargetNode, NodeError> {
        let registry = Registry::new();
        let ancestry: Vec<CompactString> = ["root", "table", "tablerow"].map(CompactString::from).to_vec();
        let cx = ConvertContext::new(&registry, &ancestry, 0);
        TableCellConverter.convert(&node, children, &cx)
    }

    #[test]
    fn test_header_state_bits() {
        assert_eq!(HeaderState::ROW | HeaderState::COLUMN, HeaderState::BOTH);
        assert!(HeaderState::BOTH.contains(HeaderState::COLUMN));
        assert!(!HeaderState::ROW.contains(HeaderState::COLUMN));
        assert_eq!(HeaderState::from_bits(7), HeaderState::BOTH);
    }

    #[test]
    fn test_header_from_legacy_flag() {
        assert_eq!(HeaderState::from_header(&json!(true)), Some(HeaderState::ROW));
        assert_eq!(HeaderState::from_header(&json!("column")), Some(HeaderState::COLUMN));
        assert_eq!(HeaderState::from_header(&json!("both")), Some(HeaderState::BOTH));
        assert_eq!(HeaderState::from_header(&json!(3)), None);
    }

    #[test]
    fn test_cell_defaults() {
        let out = cell(SourceNode::new("table-cell"), None).unwrap();

        assert_eq!(out.node_type, "tablecell");
        assert_eq!(out.get_u64("headerState"), Some(0));
        assert_eq!(out.get_u64("colSpan"), Some(1));
        assert_eq!(out.get_u64("rowSpan"), Some(1));
        assert!(out.get("width").is_none());
        assert_eq!(out.child_nodes().len(), 1);
        assert_eq!(out.child_nodes()[0].node_type, "paragraph");
    }

    #[test]
    fn test_cell_attributes() {
        let node = SourceNode::new("tablecell")
            .attr("header", "row")
            .attr("colSpan", 2)
            .attr("width", 120)
            .attr("backgroundColor", "#eee");
        let children = vec![TargetNode::new("text", 1).with("text", "Name")];
        let out = cell(node, Some(children)).unwrap();

        assert_eq!(out.get_u64("headerState"), Some(1));
        assert_eq!(out.get_u64("colSpan"), Some(2));
        assert_eq!(out.get_u64("width"), Some(120));
        assert_eq!(out.get_str("backgroundColor"), Some("#eee"));
        assert!(out.get("header").is_none());

        let para = &out.child_nodes()[0];
        assert_eq!(para.node_type, "paragraph");
        assert_eq!(para.child_nodes()[0].get_str("text"), Some("Name"));
    }

    #[test]
    fn test_cell_invalid_header() {
        let err = cell(SourceNode::new("tablecell").attr("header", "diagonal"), None).unwrap_err();
        assert_eq!(err.field(), "header");
    }

    #[test]
    fn test_row_height() {
        let registry = Registry::new();
        let cx = ConvertContext::top_level(&registry, 0);
        let out = TableRowConverter
            .convert(&SourceNode::new("table-row").attr("height", 32), None, &cx)
            .unwrap();

        assert_eq!(out.node_type, "tablerow");
        assert_eq!(out.get_u64("height"), Some(32));
        assert_eq!(out.children, Some(Vec::new()));
    }
}
