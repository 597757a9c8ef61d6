//! Leaf converters: `horizontalrule` and `linebreak`.
//!
//! Both carry nothing but their type and version.

use compact_str::CompactString;

use crate::attr::carry_over;
use crate::error::NodeError;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{
    HORIZONTAL_RULE_TYPE, HORIZONTAL_RULE_VERSION, LINE_BREAK_TYPE, LINE_BREAK_VERSION,
};

use super::Converter;

pub struct HorizontalRuleConverter;

impl Converter for HorizontalRuleConverter {
    fn node_types(&self) -> &[&'static str] {
        &["horizontalrule", "horizontal-rule", "hr"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(HORIZONTAL_RULE_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        _children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        Ok(TargetNode::new(HORIZONTAL_RULE_TYPE, HORIZONTAL_RULE_VERSION)
            .with_fields(carry_over(&node.attrs, &[])))
    }
}

pub struct LineBreakConverter;

impl Converter for LineBreakConverter {
    fn node_types(&self) -> &[&'static str] {
        &["linebreak", "line-break"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(LINE_BREAK_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        _children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        Ok(TargetNode::new(LINE_BREAK_TYPE, LINE_BREAK_VERSION)
            .with_fields(carry_over(&node.attrs, &[])))
    }
}
