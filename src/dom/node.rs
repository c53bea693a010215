use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Index of a node inside its owning `Document` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct Node {
    /// Lowercased local name. Empty for nodes without a resolvable name.
    pub tag: String,
    pub attrs: BTreeMap<String, String>,

    /// Live value property; falls back to the `value` attribute when unset.
    pub value: Option<String>,
    pub checked: bool,

    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Node {
            tag: tag.trim().to_lowercase(),
            attrs: BTreeMap::new(),
            value: None,
            checked: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Lowercased `type` attribute, only meaningful for `input`.
    pub fn input_type(&self) -> Option<String> {
        self.attr("type").map(|t| t.trim().to_lowercase())
    }

    pub fn role(&self) -> FieldRole {
        match self.tag.as_str() {
            "textarea" => FieldRole::TextArea,
            "select" => FieldRole::Select,
            "input" => match self.input_type().as_deref() {
                Some("radio") => FieldRole::Radio,
                Some("checkbox") => FieldRole::Checkbox,
                _ => FieldRole::Text,
            },
            _ => FieldRole::Other,
        }
    }
}

/// How a field holds its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Text,
    Radio,
    Checkbox,
    Select,
    TextArea,
    Other,
}

impl FieldRole {
    /// Radio and checkbox inputs persist through their checked state.
    pub fn is_checkable(self) -> bool {
        matches!(self, FieldRole::Radio | FieldRole::Checkbox)
    }
}
