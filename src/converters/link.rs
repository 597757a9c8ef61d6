//! Link converter: `link`, `autolink`.
//!
//! The legacy plugin kept link data either flat on the node or under an
//! `attributes` object. Lexical stores it under `fields`:
//!
//! ```json
//! { "type": "link", "version": 2,
//!   "fields": { "url": "...", "newTab": false, "linkType": "custom" } }
//! ```
//!
//! Internal links point at a document instead of a URL and carry
//! `fields.doc = { relationTo, value: { id } }`.

use compact_str::CompactString;
use serde_json::{Value, json};

use crate::attr::{Fields, FieldsExt, as_id};
use crate::error::NodeError;
use crate::node::{SourceNode, TargetNode};
use crate::transform::ConvertContext;
use crate::version::{AUTOLINK_TYPE, AUTOLINK_VERSION, LINK_TYPE, LINK_VERSION};

use super::{Converter, element_fields};

/// Legacy keys folded into `fields`.
const LINK_KEYS: [&str; 8] = ["attributes", "fields", "url", "newTab", "target", "linkType", "doc", "rel"];

// =============================================================================
// LinkConverter
// =============================================================================

pub struct LinkConverter;

impl Converter for LinkConverter {
    fn node_types(&self) -> &[&'static str] {
        &["link", "autolink"]
    }

    fn target_type(&self, node: &SourceNode, _parent_type: &str) -> CompactString {
        if node.type_tag() == AUTOLINK_TYPE {
            CompactString::const_new(AUTOLINK_TYPE)
        } else {
            CompactString::const_new(LINK_TYPE)
        }
    }

    fn convert(
        &self,
        node: &SourceNode,
        children: Option<Vec<TargetNode>>,
        _cx: &ConvertContext<'_>,
    ) -> Result<TargetNode, NodeError> {
        let (node_type, version) = if node.type_tag() == AUTOLINK_TYPE {
            (AUTOLINK_TYPE, AUTOLINK_VERSION)
        } else {
            (LINK_TYPE, LINK_VERSION)
        };
        let attrs = LinkAttrs::new(node);

        let mut out = TargetNode::new(node_type, version)
            .with_fields(element_fields(node, &LINK_KEYS))
            .with("fields", attrs.fields(node.type_tag())?)
            .with_children(children.unwrap_or_default());

        if let Some(rel) = attrs.get("rel").and_then(Value::as_str) {
            out.set("rel", rel);
        }
        Ok(out)
    }
}

// =============================================================================
// Attribute lookup
// =============================================================================

/// Link attributes, looked up in `fields`, then `attributes`, then on the
/// node itself.
struct LinkAttrs<'a> {
    layers: [Option<&'a Fields>; 3],
}

impl<'a> LinkAttrs<'a> {
    fn new(node: &'a SourceNode) -> Self {
        Self {
            layers: [
                node.attrs.get_object("fields"),
                node.attrs.get_object("attributes"),
                Some(&node.attrs),
            ],
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.layers
            .iter()
            .flatten()
            .copied()
            .find_map(|layer| layer.get_present(key))
    }

    fn new_tab(&self) -> bool {
        match self.get("newTab") {
            Some(Value::Bool(b)) => *b,
            _ => self.get("target").and_then(Value::as_str) == Some("_blank"),
        }
    }

    fn fields(&self, node_type: &str) -> Result<Value, NodeError> {
        let link_type = match self.get("linkType").and_then(Value::as_str) {
            None | Some("custom") => "custom",
            Some("internal") => "internal",
            Some(other) => {
                return Err(NodeError::invalid(
                    node_type,
                    "linkType",
                    format!("expected custom or internal, found {other:?}"),
                ));
            }
        };

        let mut fields = Fields::new();
        fields.insert("linkType".into(), link_type.into());
        fields.insert("newTab".into(), self.new_tab().into());

        if link_type == "internal" {
            let doc = self.get("doc").ok_or_else(|| NodeError::missing(node_type, "doc"))?;
            fields.insert("doc".into(), doc_reference(node_type, doc)?);
        } else {
            let url = self
                .get("url")
                .and_then(Value::as_str)
                .ok_or_else(|| NodeError::missing(node_type, "url"))?;
            fields.insert("url".into(), url.into());
        }

        Ok(Value::Object(fields))
    }
}

/// Normalize a document reference to `{ relationTo, value: { id } }`.
///
/// The legacy plugin stored either the bare id or a populated document under
/// `value`.
fn doc_reference(node_type: &str, doc: &Value) -> Result<Value, NodeError> {
    let relation_to = doc
        .get("relationTo")
        .and_then(Value::as_str)
        .ok_or_else(|| NodeError::invalid(node_type, "doc", "missing `relationTo`"))?;

    let id = match doc.get("value") {
        Some(Value::Object(populated)) => populated.get("id").and_then(as_id),
        Some(bare) => as_id(bare),
        None => None,
    }
    .ok_or_else(|| NodeError::invalid(node_type, "doc", "missing document id"))?;

    Ok(json!({ "relationTo": relation_to, "value": { "id": id } }))
}
