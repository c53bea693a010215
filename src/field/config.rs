use serde::{Deserialize, Serialize};

use crate::dom::document::Document;
use crate::dom::node::NodeId;

pub const DEFAULT_INPUTS: &str =
    "input[type=text], input[type=radio], input[type=checkbox], textarea, select";

pub const DEFAULT_EVENTS: [&str; 7] = [
    "DOMAttrModified",
    "textInput",
    "input",
    "change",
    "keypress",
    "paste",
    "focus",
];

/// Events on the enclosing form that erase persisted values.
pub const DESTROY_EVENTS: [&str; 2] = ["submit", "reset"];

/// Marker attribute picked up by the document-ready auto-bind.
pub const PERSIST_ATTR: &str = "data-persist";
pub const PERSIST_VALUE: &str = "garlic";

// ============================================================================
// Caller-supplied / declarative options (every key optional)
// ============================================================================

/// One configuration layer. Unset keys fall through to lower layers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GarlicOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    /// Selector of eligible fields inside a bound form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<String>,

    /// Events that trigger a capture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,

    /// Erase persisted values on form submit/reset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destroy: Option<bool>,

    /// `Some(false)` opts a field out of persistence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<bool>,
}

impl GarlicOptions {
    /// Read the recognized `data-*` attributes of a node.
    ///
    /// | attribute      | key       |
    /// |----------------|-----------|
    /// | `data-debug`   | `debug`   |
    /// | `data-inputs`  | `inputs`  |
    /// | `data-events`  | `events`  (whitespace or comma separated) |
    /// | `data-destroy` | `destroy` |
    /// | `data-storage` | `storage` |
    pub fn from_attributes(doc: &Document, id: NodeId) -> Self {
        GarlicOptions {
            debug: doc.attr(id, "data-debug").and_then(parse_bool),
            inputs: doc
                .attr(id, "data-inputs")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            events: doc
                .attr(id, "data-events")
                .map(parse_event_list)
                .filter(|e| !e.is_empty()),
            destroy: doc.attr(id, "data-destroy").and_then(parse_bool),
            storage: doc.attr(id, "data-storage").and_then(parse_bool),
        }
    }

    /// Layer `higher` over `self`: keys set in `higher` win.
    pub fn overlay(&self, higher: &GarlicOptions) -> GarlicOptions {
        GarlicOptions {
            debug: higher.debug.or(self.debug),
            inputs: higher.inputs.clone().or_else(|| self.inputs.clone()),
            events: higher.events.clone().or_else(|| self.events.clone()),
            destroy: higher.destroy.or(self.destroy),
            storage: higher.storage.or(self.storage),
        }
    }
}

// ============================================================================
// Effective per-field configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub debug: bool,
    pub inputs: String,
    pub events: Vec<String>,
    pub destroy: bool,
    pub opt_out: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            debug: true,
            inputs: DEFAULT_INPUTS.to_string(),
            events: DEFAULT_EVENTS.iter().map(|e| e.to_string()).collect(),
            destroy: true,
            opt_out: false,
        }
    }
}

impl FieldConfig {
    /// Resolve a stack of layers over the defaults, lowest precedence first:
    /// `[call-site options, root attributes, field attributes]`.
    pub fn merge(layers: &[&GarlicOptions]) -> FieldConfig {
        let merged = layers
            .iter()
            .fold(GarlicOptions::default(), |acc, layer| acc.overlay(layer));
        FieldConfig::from_options(&merged)
    }

    pub fn from_options(options: &GarlicOptions) -> FieldConfig {
        let defaults = FieldConfig::default();
        FieldConfig {
            debug: options.debug.unwrap_or(defaults.debug),
            inputs: options.inputs.clone().unwrap_or(defaults.inputs),
            events: options.events.clone().unwrap_or(defaults.events),
            destroy: options.destroy.unwrap_or(defaults.destroy),
            opt_out: options.storage == Some(false),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_event_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool(" FALSE "), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(""), Some(true));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn parse_event_list_splits_on_space_and_comma() {
        assert_eq!(
            parse_event_list("input, change  keyup"),
            vec!["input", "change", "keyup"]
        );
        assert!(parse_event_list(" , ").is_empty());
    }
}
