//! Mark converter: `mark` (comment and highlight anchors).

use compact_str::CompactString;
use serde_json::Value;

use crate::attr::FieldsExt;
use crate::error::NodeError;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{MARK_TYPE, MARK_VERSION};

use super::{Converter, element_fields};

pub struct MarkConverter;

impl Converter for MarkConverter {
    fn node_types(&self) -> &[&'static str] {
        &["mark"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(MARK_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        let ids = mark_ids(node)?;

        Ok(TargetNode::new(MARK_TYPE, MARK_VERSION)
            .with_fields(element_fields(node, &["ids", "id"]))
            .with("ids", ids)
            .with_children(children.unwrap_or_default()))
    }
}

/// Mark ids from an `ids` array or a single `id`.
fn mark_ids(node: &SourceNode) -> Result<Vec<Value>, NodeError> {
    if let Some(ids) = node.attrs.get_array("ids") {
        return ids
            .iter()
            .map(|id| match id {
                Value::String(_) => Ok(id.clone()),
                other => Err(NodeError::invalid(
                    node.type_tag(),
                    "ids",
                    format!("expected string ids, found {other}"),
                )),
            })
            .collect();
    }

    match node.attrs.get_str("id") {
        Some(id) => Ok(vec![Value::from(id)]),
        None => Err(NodeError::missing(node.type_tag(), "ids")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use serde_json::json;

    fn convert(node: SourceNode) -> Result<TargetNode, NodeError> {
        let registry = Registry::new();
        let cx = ConvertContext::top_level(&registry, 0);
        MarkConverter.convert(&node, Some(Vec::new()), &cx)
    }

    #[test]
    fn test_mark_ids() {
        let out = convert(SourceNode::new("mark").attr("ids", json!(["c1", "c2"]))).unwrap();
        assert_eq!(out.get("ids"), Some(&json!(["c1", "c2"])));

        let out = convert(SourceNode::new("mark").attr("id", "c3")).unwrap();
        assert_eq!(out.get("ids"), Some(&json!(["c3"])));
        assert!(out.get("id").is_none());
    }

    #[test]
    fn test_mark_errors() {
        let err = convert(SourceNode::new("mark")).unwrap_err();
        assert_eq!(err, NodeError::missing("mark", "ids"));

        let err = convert(SourceNode::new("mark").attr("ids", json!([1]))).unwrap_err();
        assert_eq!(err.field(), "ids");
    }
}
