//! Relationship converter: `relationship` (embedded document references).

use compact_str::CompactString;
use serde_json::{Value, json};

use crate::attr::{FieldsExt, as_id, carry_over};
use crate::error::NodeError;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{RELATIONSHIP_TYPE, RELATIONSHIP_VERSION};

use super::Converter;

pub struct RelationshipConverter;

impl Converter for RelationshipConverter {
    fn node_types(&self) -> &[&'static str] {
        &["relationship"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(RELATIONSHIP_TYPE)
    }

    fn convert(
        &self,
        node: &SourceNode,
        _children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        let node_type = node.type_tag();
        let relation_to = node.attrs.require_str(node_type, "relationTo")?;
        let id = match node.attrs.require(node_type, "value")? {
            Value::Object(doc) => doc.get("id").and_then(as_id),
            bare => as_id(bare),
        }
        .ok_or_else(|| NodeError::invalid(node_type, "value", "missing document id"))?;

        Ok(TargetNode::new(RELATIONSHIP_TYPE, RELATIONSHIP_VERSION)
            .with_fields(carry_over(&node.attrs, &["relationTo", "value", "format"]))
            .with("relationTo", relation_to)
            .with("value", json!({ "id": id }))
            .with("format", node.attrs.get_str("format").unwrap_or("")))
    }
}
