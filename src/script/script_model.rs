use serde::{Deserialize, Serialize};

use crate::field::config::GarlicOptions;
use crate::field::controller::ControllerMethod;

/// A replay script: user interactions and page loads against one document,
/// with assertions on fields and on the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplayScript {
    /// Human-readable name for this script
    pub name: String,

    /// Ordered list of steps to execute
    pub steps: Vec<ReplayStep>,
}

/// Node references are selectors that must match exactly one node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReplayStep {
    /// Bind a form or field; without a selector, run the document-ready auto-bind
    Bind {
        #[serde(default)]
        selector: Option<String>,
        #[serde(default)]
        options: GarlicOptions,
    },

    /// Type a value into a field, then fire `event` on it
    Input {
        selector: String,
        value: String,
        #[serde(default = "default_input_event")]
        event: String,
    },

    /// Set a checkable field's checked state, then fire `event` on it
    Check {
        selector: String,
        #[serde(default = "default_true")]
        checked: bool,
        #[serde(default = "default_change_event")]
        event: String,
    },

    /// Fire an event on a node (e.g. `submit` on a form)
    Dispatch {
        selector: String,
        event: String,
    },

    /// Run a controller method on a bound field
    Invoke {
        selector: String,
        method: ControllerMethod,
    },

    /// Load the page again from its snapshot and replay earlier bind steps
    Reload,

    /// Run assertions against the current document and store
    Assert {
        assertions: Vec<AssertionSpec>,
    },
}

fn default_input_event() -> String { "input".to_string() }
fn default_change_event() -> String { "change".to_string() }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssertionSpec {
    /// The field's entry holds exactly `expected`
    Stored { selector: String, expected: String },

    /// The field has no entry
    NotStored { selector: String },

    /// The field's current value
    Value { selector: String, expected: String },

    /// The field's checked state
    Checked { selector: String, expected: bool },

    /// The field resolves to this key
    Key { selector: String, expected: String },

    /// Number of entries under the namespace marker
    StoreSize { expected: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// Which step this assertion belongs to (0-indexed)
    pub step_index: usize,

    pub spec: AssertionSpec,

    pub passed: bool,

    /// Actual value found (for debugging failed assertions)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayResult {
    pub script_name: String,

    /// Whether all steps ran and all assertions passed
    pub passed: bool,

    pub steps_run: usize,

    pub assertion_results: Vec<AssertionResult>,

    /// Error message if a step could not be executed
    pub error: Option<String>,
}

impl ReplayScript {
    pub fn from_yaml(yaml: &str) -> Result<Self, crate::error::GarlicError> {
        serde_yaml::from_str(yaml).map_err(|e| crate::error::GarlicError::YamlParse {
            context: "replay script".into(),
            source: e,
        })
    }
}
