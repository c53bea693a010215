use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::document::Document;
use crate::dom::node::{Node, NodeId};
use crate::error::GarlicError;

/// Serialized form of a document: where it lives and its element tree.
///
/// ```json
/// { "origin": "example.com", "route": "/signup",
///   "root": { "tag": "html", "children": [
///     { "tag": "form", "attrs": { "id": "f" }, "children": [
///       { "tag": "input", "attrs": { "type": "text", "name": "email" } } ] } ] } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSnapshot {
    pub origin: String,
    pub route: String,
    pub root: NodeSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeSnapshot {
    pub tag: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default)]
    pub checked: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl DocumentSnapshot {
    pub fn from_json(json: &str) -> Result<Self, GarlicError> {
        serde_json::from_str(json).map_err(|e| GarlicError::JsonParse {
            context: "document snapshot".into(),
            source: e,
        })
    }

    /// Build a live document, as a fresh page load would.
    pub fn to_document(&self) -> Result<Document, GarlicError> {
        let mut doc = Document::new(&self.origin, &self.route, &self.root.tag);
        let root = doc.root();
        apply_state(&mut doc, root, &self.root)?;

        let mut pending: Vec<(NodeId, &NodeSnapshot)> = vec![(root, &self.root)];
        while let Some((parent, snapshot)) = pending.pop() {
            for child in &snapshot.children {
                let id = doc.append_node(parent, to_node(child))?;
                pending.push((id, child));
            }
        }

        Ok(doc)
    }
}

impl Document {
    /// Capture the current tree (including live values and checked state).
    pub fn to_snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            origin: self.origin().to_string(),
            route: self.route().to_string(),
            root: snapshot_node(self, self.root()),
        }
    }
}

fn to_node(snapshot: &NodeSnapshot) -> Node {
    let mut node = Node::new(&snapshot.tag);
    node.attrs = snapshot
        .attrs
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.clone()))
        .collect();
    node.value = snapshot.value.clone();
    node.checked = snapshot.checked || node.attrs.contains_key("checked");
    node
}

fn apply_state(doc: &mut Document, id: NodeId, snapshot: &NodeSnapshot) -> Result<(), GarlicError> {
    let node = to_node(snapshot);
    for (name, value) in &node.attrs {
        doc.set_attr(id, name, value)?;
    }
    if let Some(value) = &node.value {
        doc.set_value(id, value)?;
    }
    doc.set_checked(id, node.checked)
}

fn snapshot_node(doc: &Document, id: NodeId) -> NodeSnapshot {
    let (tag, attrs, value, checked) = match doc.node(id) {
        Some(n) => (n.tag.clone(), n.attrs.clone(), n.value.clone(), n.checked),
        None => (String::new(), BTreeMap::new(), None, false),
    };

    NodeSnapshot {
        tag,
        attrs,
        value,
        checked,
        children: doc
            .children(id)
            .iter()
            .map(|c| snapshot_node(doc, *c))
            .collect(),
    }
}
