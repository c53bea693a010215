use std::fmt;

use crate::dom::document::Document;
use crate::dom::node::{FieldRole, NodeId};
use crate::error::GarlicError;
use crate::storage::store::NAMESPACE;

/// Separator between path segments, and between route and path.
pub const DELIMITER: char = '>';

/// Storage key identifying a field's persistence slot.
///
/// Shape: `garlic:<origin><route>>form.<name>[:eq(x)]>...>input.<name>[:eq(y)]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey(String);

impl PathKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a selection that must contain exactly one node.
pub fn resolve(doc: &Document, selection: &[NodeId]) -> Result<PathKey, GarlicError> {
    match selection {
        [single] => resolve_node(doc, *single),
        _ => Err(GarlicError::UnresolvablePath(format!(
            "selection matched {} nodes, expected exactly 1",
            selection.len()
        ))),
    }
}

pub fn resolve_selector(doc: &Document, selector: &str) -> Result<PathKey, GarlicError> {
    resolve(doc, &doc.select(selector)?)
}

/// Build the key for `field` by walking its ancestors up to the
/// enclosing form.
///
/// Only `form`, `input`, `select` and `textarea` contribute segments, except
/// for checkboxes: they often share a name and an index within their direct
/// parent, so every wrapper on the way up is kept to tell them apart.
/// Radios never get an index so all radios of a group share one key.
pub fn resolve_node(doc: &Document, field: NodeId) -> Result<PathKey, GarlicError> {
    if doc.node(field).is_none() {
        return Err(GarlicError::UnknownNode(field.0));
    }

    let full_path = doc.role(field) == FieldRole::Checkbox;
    if !full_path && !is_addressable(doc.tag(field)) {
        return Err(GarlicError::UnresolvablePath(format!(
            "node #{} <{}> is not a form control",
            field.0,
            doc.tag(field)
        )));
    }

    let mut segments: Vec<String> = Vec::new();
    let mut current = Some(field);

    while let Some(node_id) = current {
        let tag = doc.tag(node_id);
        if tag.is_empty() {
            return Err(GarlicError::UnresolvablePath(format!(
                "unnamed node #{} above field #{}",
                node_id.0, field.0
            )));
        }

        if !full_path && !is_addressable(tag) {
            current = doc.parent(node_id);
            continue;
        }

        segments.push(segment(doc, node_id));

        if tag == "form" {
            break;
        }
        current = doc.parent(node_id);
    }

    segments.reverse();
    let path = segments.join(&DELIMITER.to_string());

    Ok(PathKey(format!(
        "{}{}{}{}{}",
        NAMESPACE,
        doc.origin(),
        doc.route(),
        DELIMITER,
        path
    )))
}

fn is_addressable(tag: &str) -> bool {
    matches!(tag, "form" | "input" | "select" | "textarea")
}

/// `tag[.name][:eq(i)]`
fn segment(doc: &Document, id: NodeId) -> String {
    let mut segment = doc.tag(id).to_string();

    if let Some(name) = doc.attr(id, "name") {
        segment.push('.');
        segment.push_str(name);
    }

    let siblings = doc.same_tag_siblings(id);
    if siblings.len() > 1 && doc.role(id) != FieldRole::Radio {
        if let Some(index) = siblings.iter().position(|s| *s == id) {
            segment.push_str(&format!(":eq({})", index));
        }
    }

    segment
}
