//! Upload converter: `upload` (images and other media documents).
//!
//! A legacy upload references its media document through `rawImagePayload`
//! (`{ relationTo, value }`) or flat `relationTo`/`value` attributes. An
//! optional caption is a complete editor state of its own under
//! `caption.editorState`; the walker migrates it before the upload is built.

use compact_str::CompactString;
use serde_json::{Value, json};

use crate::attr::{Fields, FieldsExt, as_id, carry_over};
use crate::error::NodeError;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{UPLOAD_TYPE, UPLOAD_VERSION};

use super::Converter;

/// Attribute holding the embedded caption.
pub const CAPTION_FIELD: &str = "caption";

const UPLOAD_KEYS: [&str; 6] = ["rawImagePayload", "relationTo", "value", "caption", "fields", "format"];

pub struct UploadConverter;

impl Converter for UploadConverter {
    fn node_types(&self) -> &[&'static str] {
        &["upload"]
    }

    fn target_type(&self, _node: &SourceNode, _parent_type: &str) -> CompactString {
        CompactString::const_new(UPLOAD_TYPE)
    }

    fn nested_states<'a>(&self, node: &'a SourceNode) -> Vec<(&'static str, &'a Value)> {
        node.attrs
            .get_object(CAPTION_FIELD)
            .and_then(|caption| caption.get_present("editorState"))
            .map(|state| vec![(CAPTION_FIELD, state)])
            .unwrap_or_default()
    }

    fn convert(
        &self,
        node: &SourceNode,
        _children: Option<Vec<TargetNode>>,
        cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        let node_type = node.type_tag();
        let payload = node.attrs.get_object("rawImagePayload").unwrap_or(&node.attrs);

        let relation_to = payload.require_str(node_type, "relationTo")?;
        let id = match payload.require(node_type, "value")? {
            Value::Object(doc) => doc.get("id").and_then(as_id),
            bare => as_id(bare),
        }
        .ok_or_else(|| NodeError::invalid(node_type, "value", "missing document id"))?;

        let mut fields = Fields::new();
        if let Some(caption) = cx.nested(CAPTION_FIELD) {
            let caption = serde_json::to_value(caption)
                .map_err(|e| NodeError::invalid(node_type, "caption", e.to_string()))?;
            fields.insert(CAPTION_FIELD.into(), caption);
        }

        Ok(TargetNode::new(UPLOAD_TYPE, UPLOAD_VERSION)
            .with_fields(carry_over(&node.attrs, &UPLOAD_KEYS))
            .with("relationTo", relation_to)
            .with("value", json!({ "id": id }))
            .with("fields", fields)
            .with("format", node.attrs.get_str("format").unwrap_or("")))
    }
}
