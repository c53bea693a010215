use serde::{Deserialize, Serialize};

use crate::dom::document::Document;
use crate::dom::node::{FieldRole, NodeId};
use crate::error::GarlicError;
use crate::field::config::FieldConfig;
use crate::path::resolver::{PathKey, resolve_node};
use crate::storage::store::Storage;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{TraceAction, TraceEvent};

/// Observable lifecycle of a bound field.
///
/// `Bound` right after construction (restore already ran), `Idle` after a
/// capture, `Cleared` after its entry was erased. A cleared field goes back
/// to `Idle` on the next capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Bound,
    Idle,
    Cleared,
}

/// Controller operations that can be invoked by name through the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerMethod {
    Persist,
    Retrieve,
    Destroy,
    Remove,
    Path,
}

impl ControllerMethod {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "persist" => Some(ControllerMethod::Persist),
            "retrieve" => Some(ControllerMethod::Retrieve),
            "destroy" => Some(ControllerMethod::Destroy),
            "remove" => Some(ControllerMethod::Remove),
            "path" | "getPath" => Some(ControllerMethod::Path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MethodOutput {
    Done,
    Path(PathKey),
}

/// Lifecycle of one persisted field.
#[derive(Debug, Clone)]
pub struct FieldController {
    field: NodeId,
    role: FieldRole,
    path: PathKey,
    config: FieldConfig,
    state: ControllerState,
}

impl FieldController {
    /// Resolve the field's key and restore any saved value.
    pub fn bind(
        doc: &mut Document,
        storage: &Storage,
        field: NodeId,
        config: FieldConfig,
        tracer: &TraceLogger,
    ) -> Result<Self, GarlicError> {
        let path = resolve_node(doc, field)?;
        let mut controller = FieldController {
            field,
            role: doc.role(field),
            path,
            config,
            state: ControllerState::Bound,
        };

        controller.trace(tracer, TraceEvent::now(TraceAction::Bind), None);
        controller.retrieve(doc, storage, tracer)?;
        Ok(controller)
    }

    pub fn field(&self) -> NodeId {
        self.field
    }

    pub fn role(&self) -> FieldRole {
        self.role
    }

    pub fn path(&self) -> &PathKey {
        &self.path
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Recompute the key after the document changed shape.
    pub fn refresh_path(&mut self, doc: &Document) -> Result<(), GarlicError> {
        self.path = resolve_node(doc, self.field)?;
        Ok(())
    }

    /// Apply the stored value. Checkable inputs are checked only when the
    /// stored string equals their own value exactly; a restored radio
    /// unchecks the rest of its group.
    pub fn retrieve(
        &mut self,
        doc: &mut Document,
        storage: &Storage,
        tracer: &TraceLogger,
    ) -> Result<(), GarlicError> {
        let Some(stored) = storage.get(self.path.as_str()) else {
            return Ok(());
        };

        if self.role.is_checkable() {
            if stored == doc.value(self.field) {
                doc.check(self.field)?;
                self.trace(
                    tracer,
                    TraceEvent::now(TraceAction::Restore).with_detail("checked"),
                    None,
                );
            }
            return Ok(());
        }

        doc.set_value(self.field, &stored)?;
        self.trace(tracer, TraceEvent::now(TraceAction::Restore), None);
        Ok(())
    }

    /// Save the current value. A checkbox that already has an entry is
    /// toggled off instead.
    pub fn persist(
        &mut self,
        doc: &mut Document,
        storage: &mut Storage,
        tracer: &TraceLogger,
    ) -> Result<(), GarlicError> {
        self.persist_on(None, doc, storage, tracer)
    }

    /// `persist`, recording the document event that triggered it.
    pub fn persist_on(
        &mut self,
        event: Option<&str>,
        doc: &mut Document,
        storage: &mut Storage,
        tracer: &TraceLogger,
    ) -> Result<(), GarlicError> {
        if self.role == FieldRole::Checkbox && storage.has(self.path.as_str()) {
            self.trace(tracer, TraceEvent::now(TraceAction::ToggleOff), event);
            return self.destroy_on(event, doc, storage, tracer);
        }

        let value = doc.value(self.field);
        storage.set(self.path.as_str(), &value);
        self.state = ControllerState::Idle;
        self.trace(
            tracer,
            TraceEvent::now(TraceAction::Capture).with_detail(format!("{} bytes", value.len())),
            event,
        );
        Ok(())
    }

    /// Erase the entry; checkable inputs are unchecked. The field's text
    /// value is left alone.
    pub fn destroy(
        &mut self,
        doc: &mut Document,
        storage: &mut Storage,
        tracer: &TraceLogger,
    ) -> Result<(), GarlicError> {
        self.destroy_on(None, doc, storage, tracer)
    }

    /// `destroy`, recording the document event that triggered it.
    pub fn destroy_on(
        &mut self,
        event: Option<&str>,
        doc: &mut Document,
        storage: &mut Storage,
        tracer: &TraceLogger,
    ) -> Result<(), GarlicError> {
        if self.role.is_checkable() {
            doc.set_checked(self.field, false)?;
        }

        storage.delete(self.path.as_str());
        self.state = ControllerState::Cleared;
        self.trace(tracer, TraceEvent::now(TraceAction::Clear), event);
        Ok(())
    }

    /// Erase the entry and empty the field.
    pub fn remove(
        &mut self,
        doc: &mut Document,
        storage: &mut Storage,
        tracer: &TraceLogger,
    ) -> Result<(), GarlicError> {
        self.destroy(doc, storage, tracer)?;
        if !self.role.is_checkable() {
            doc.set_value(self.field, "")?;
        }
        self.trace(tracer, TraceEvent::now(TraceAction::Remove), None);
        Ok(())
    }

    pub fn invoke(
        &mut self,
        method: ControllerMethod,
        doc: &mut Document,
        storage: &mut Storage,
        tracer: &TraceLogger,
    ) -> Result<MethodOutput, GarlicError> {
        match method {
            ControllerMethod::Persist => self.persist(doc, storage, tracer)?,
            ControllerMethod::Retrieve => self.retrieve(doc, storage, tracer)?,
            ControllerMethod::Destroy => self.destroy(doc, storage, tracer)?,
            ControllerMethod::Remove => self.remove(doc, storage, tracer)?,
            ControllerMethod::Path => return Ok(MethodOutput::Path(self.path.clone())),
        }
        Ok(MethodOutput::Done)
    }

    fn trace(&self, tracer: &TraceLogger, event: TraceEvent, trigger: Option<&str>) {
        if !self.config.debug {
            return;
        }
        let event = event.with_field(self.field).with_key(&self.path);
        match trigger {
            Some(name) => tracer.log(&event.with_event(name)),
            None => tracer.log(&event),
        }
    }
}
