use std::collections::BTreeMap;

use crate::binder::events::{HandlerAction, Subscription};
use crate::dom::document::Document;
use crate::dom::node::NodeId;
use crate::dom::selector::Selector;
use crate::error::GarlicError;
use crate::field::config::{DESTROY_EVENTS, FieldConfig, GarlicOptions, PERSIST_ATTR, PERSIST_VALUE};
use crate::field::controller::{ControllerMethod, FieldController, MethodOutput};
use crate::storage::store::Storage;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{TraceAction, TraceEvent};

/// Outcome of one bind pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindReport {
    /// The store is unavailable; nothing was bound.
    pub inert: bool,
    pub bound: Vec<NodeId>,
    pub already_bound: Vec<NodeId>,
    pub opted_out: Vec<NodeId>,
    pub unresolvable: Vec<NodeId>,
    /// Results of a method invoked on each bound field.
    pub outputs: Vec<(NodeId, MethodOutput)>,
    pub errors: Vec<String>,
}

impl BindReport {
    fn inert() -> Self {
        BindReport {
            inert: true,
            ..Default::default()
        }
    }

    pub fn merge(&mut self, other: BindReport) {
        self.inert |= other.inert;
        self.bound.extend(other.bound);
        self.already_bound.extend(other.already_bound);
        self.opted_out.extend(other.opted_out);
        self.unresolvable.extend(other.unresolvable);
        self.outputs.extend(other.outputs);
        self.errors.extend(other.errors);
    }
}

/// Discovers fields, owns their controllers and routes document events
/// to them.
pub struct Binder {
    storage: Storage,
    tracer: TraceLogger,
    controllers: BTreeMap<NodeId, FieldController>,
    subscriptions: Vec<Subscription>,
    debug_exposed: bool,
}

impl Binder {
    pub fn new(storage: Storage) -> Self {
        Binder {
            storage,
            tracer: TraceLogger::disabled(),
            controllers: BTreeMap::new(),
            subscriptions: Vec::new(),
            debug_exposed: false,
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    // =========================================================================
    // Binding
    // =========================================================================

    pub fn bind(&mut self, doc: &mut Document, root: NodeId, options: &GarlicOptions) -> BindReport {
        self.bind_with(doc, root, options, None)
    }

    /// Bind every eligible field under `root` (a form) or `root` itself
    /// (a single field). Fields already bound are left as they are and only
    /// receive `method`, if one is given.
    pub fn bind_with(
        &mut self,
        doc: &mut Document,
        root: NodeId,
        options: &GarlicOptions,
        method: Option<ControllerMethod>,
    ) -> BindReport {
        let base = options.overlay(&GarlicOptions::from_attributes(doc, root));
        let root_config = FieldConfig::from_options(&base);

        if !self.storage.defined() {
            if root_config.debug {
                self.tracer
                    .log(&TraceEvent::now(TraceAction::Inert).with_field(root));
            }
            return BindReport::inert();
        }

        let mut report = BindReport::default();
        self.debug_exposed |= root_config.debug;

        let fields = match eligible_fields(doc, root, &root_config.inputs) {
            Ok(fields) => fields,
            Err(e) => {
                report.errors.push(e.to_string());
                return report;
            }
        };

        for field in fields {
            let config =
                FieldConfig::from_options(&base.overlay(&GarlicOptions::from_attributes(doc, field)));

            if config.opt_out {
                report.opted_out.push(field);
                continue;
            }

            if self.controllers.contains_key(&field) {
                report.already_bound.push(field);
                if config.debug {
                    self.tracer
                        .log(&TraceEvent::now(TraceAction::Rebind).with_field(field));
                }
            } else {
                match FieldController::bind(doc, &self.storage, field, config.clone(), &self.tracer) {
                    Ok(controller) => {
                        self.subscribe(doc, field, &config);
                        self.controllers.insert(field, controller);
                        report.bound.push(field);
                    }
                    Err(GarlicError::UnresolvablePath(reason)) => {
                        if config.debug {
                            self.tracer.log(
                                &TraceEvent::now(TraceAction::Skip)
                                    .with_field(field)
                                    .with_detail(reason),
                            );
                        }
                        report.unresolvable.push(field);
                        continue;
                    }
                    Err(e) => {
                        report.errors.push(e.to_string());
                        continue;
                    }
                }
            }

            if let Some(method) = method {
                match self.invoke(doc, field, method) {
                    Ok(output) => report.outputs.push((field, output)),
                    Err(e) => report.errors.push(e.to_string()),
                }
            }
        }

        report
    }

    /// Document-ready entry point: bind every element marked
    /// `data-persist="garlic"` with default options.
    pub fn auto_bind(&mut self, doc: &mut Document) -> BindReport {
        let marker = format!("[{}={}]", PERSIST_ATTR, PERSIST_VALUE);
        let roots = match doc.select(&marker) {
            Ok(roots) => roots,
            Err(e) => {
                return BindReport {
                    errors: vec![e.to_string()],
                    ..Default::default()
                };
            }
        };

        let mut report = BindReport::default();
        for root in roots {
            report.merge(self.bind(doc, root, &GarlicOptions::default()));
        }
        report
    }

    fn subscribe(&mut self, doc: &Document, field: NodeId, config: &FieldConfig) {
        for event in &config.events {
            self.subscriptions.push(Subscription::capture(event, field));
        }

        if config.destroy {
            if let Some(form) = doc.closest_form(field) {
                for event in DESTROY_EVENTS {
                    self.subscriptions.push(Subscription::clear(event, form, field));
                }
            }
        }
    }

    /// Drop the field's controller and every subscription it owns.
    pub fn unbind(&mut self, field: NodeId) -> bool {
        let Some(controller) = self.controllers.remove(&field) else {
            return false;
        };

        self.subscriptions.retain(|s| s.owner != field);
        if controller.config().debug {
            self.tracer.log(
                &TraceEvent::now(TraceAction::Unbind)
                    .with_field(field)
                    .with_key(controller.path()),
            );
        }
        true
    }

    /// Forget every controller and subscription, as when the page unloads.
    /// The store is kept.
    pub fn reset(&mut self) {
        self.controllers.clear();
        self.subscriptions.clear();
    }

    /// Unbind every field no longer attached to the document.
    pub fn prune_detached(&mut self, doc: &Document) -> Vec<NodeId> {
        let detached: Vec<NodeId> = self
            .controllers
            .keys()
            .copied()
            .filter(|f| !doc.is_attached(*f))
            .collect();

        for field in &detached {
            self.unbind(*field);
        }
        detached
    }

    /// Recompute every key after the document changed shape. Fields that can
    /// no longer be resolved are unbound and returned.
    pub fn refresh_paths(&mut self, doc: &Document) -> Vec<NodeId> {
        let mut lost = Vec::new();
        for (field, controller) in self.controllers.iter_mut() {
            if controller.refresh_path(doc).is_err() {
                lost.push(*field);
            }
        }
        for field in &lost {
            self.unbind(*field);
        }
        lost
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Deliver `event` to `target`, then bubble it through its ancestors.
    /// Handlers run synchronously in registration order; returns how many ran.
    pub fn dispatch(&mut self, doc: &mut Document, target: NodeId, event: &str) -> usize {
        let mut path = vec![target];
        path.extend(doc.ancestors(target));

        let handlers: Vec<Subscription> = path
            .iter()
            .flat_map(|node| {
                self.subscriptions
                    .iter()
                    .filter(move |s| s.listens(*node, event))
                    .cloned()
            })
            .collect();

        let mut ran = 0;
        for handler in handlers {
            let Some(controller) = self.controllers.get_mut(&handler.owner) else {
                continue;
            };

            let result = match handler.action {
                HandlerAction::Capture => {
                    controller.persist_on(Some(event), doc, &mut self.storage, &self.tracer)
                }
                HandlerAction::Clear => {
                    controller.destroy_on(Some(event), doc, &mut self.storage, &self.tracer)
                }
            };

            match result {
                Ok(()) => ran += 1,
                Err(e) => eprintln!(
                    "Warning: {} handler for field #{} failed: {}",
                    event, handler.owner.0, e
                ),
            }
        }
        ran
    }

    /// Run a controller method on an already bound field.
    pub fn invoke(
        &mut self,
        doc: &mut Document,
        field: NodeId,
        method: ControllerMethod,
    ) -> Result<MethodOutput, GarlicError> {
        if !self.storage.defined() {
            return Err(GarlicError::StoreUnavailable);
        }
        let controller = self
            .controllers
            .get_mut(&field)
            .ok_or(GarlicError::UnknownNode(field.0))?;
        controller.invoke(method, doc, &mut self.storage, &self.tracer)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn controller(&self, field: NodeId) -> Option<&FieldController> {
        self.controllers.get(&field)
    }

    pub fn controllers(&self) -> impl Iterator<Item = &FieldController> {
        self.controllers.values()
    }

    pub fn is_bound(&self, field: NodeId) -> bool {
        self.controllers.contains_key(&field)
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// The store, exposed only once a bind ran in debug mode.
    pub fn debug_storage(&self) -> Option<&Storage> {
        self.debug_exposed.then_some(&self.storage)
    }

    pub fn tracer(&self) -> &TraceLogger {
        &self.tracer
    }

    /// Hand the store back, e.g. to bind a freshly loaded document.
    pub fn into_storage(self) -> Storage {
        self.storage
    }
}

fn eligible_fields(doc: &Document, root: NodeId, inputs: &str) -> Result<Vec<NodeId>, GarlicError> {
    let selector = Selector::parse(inputs)?;

    if doc.tag(root) == "form" {
        Ok(doc.select_within(root, &selector))
    } else if selector.matches(doc, root) {
        Ok(vec![root])
    } else {
        Ok(Vec::new())
    }
}
