use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::dom::node::NodeId;
use crate::path::resolver::PathKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceAction {
    Bind,
    Rebind,
    Restore,
    Capture,
    ToggleOff,
    Clear,
    Remove,
    Skip,
    Unbind,
    Inert,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub action: TraceAction,

    pub field: Option<usize>,
    pub key: Option<String>,
    pub event: Option<String>,
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn now(action: TraceAction) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            action,
            field: None,
            key: None,
            event: None,
            detail: None,
        }
    }

    pub fn with_field(mut self, field: NodeId) -> Self {
        self.field = Some(field.0);
        self
    }

    pub fn with_key(mut self, key: &PathKey) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_event(mut self, event: impl ToString) -> Self {
        self.event = Some(event.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
