use crate::dom::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerAction {
    /// Run the owner's persist
    Capture,
    /// Run the owner's destroy
    Clear,
}

/// One registered listener: `event` arriving at `target` runs `action`
/// on the controller bound to `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub event: String,
    pub target: NodeId,
    pub owner: NodeId,
    pub action: HandlerAction,
}

impl Subscription {
    pub fn capture(event: &str, field: NodeId) -> Self {
        Subscription {
            event: event.to_string(),
            target: field,
            owner: field,
            action: HandlerAction::Capture,
        }
    }

    pub fn clear(event: &str, form: NodeId, field: NodeId) -> Self {
        Subscription {
            event: event.to_string(),
            target: form,
            owner: field,
            action: HandlerAction::Clear,
        }
    }

    pub fn listens(&self, target: NodeId, event: &str) -> bool {
        self.target == target && self.event == event
    }
}
