use crate::binder::binder::Binder;
use crate::dom::document::Document;
use crate::dom::node::NodeId;
use crate::dom::snapshot::DocumentSnapshot;
use crate::error::GarlicError;
use crate::field::config::GarlicOptions;
use crate::path::resolver::resolve_node;
use crate::script::context::ReplayContext;
use crate::script::script_model::{AssertionResult, AssertionSpec, ReplayResult, ReplayScript, ReplayStep};
use crate::storage::store::NAMESPACE;

/// Executes a ReplayScript against a live document and a binder.
pub struct ReplayRunner {
    snapshot: DocumentSnapshot,
    doc: Document,
    binder: Binder,
}

impl ReplayRunner {
    pub fn new(snapshot: DocumentSnapshot, binder: Binder) -> Result<Self, GarlicError> {
        let doc = snapshot.to_document()?;
        Ok(ReplayRunner {
            snapshot,
            doc,
            binder,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    pub fn into_binder(self) -> Binder {
        self.binder
    }

    /// Run every step; stops at the first step that cannot be executed.
    pub fn run(&mut self, script: &ReplayScript) -> ReplayResult {
        let mut ctx = ReplayContext::new();

        for (i, step) in script.steps.iter().enumerate() {
            ctx.current_step = i;

            if let Err(e) = self.execute_step(step, i, &mut ctx) {
                return ReplayResult {
                    script_name: script.name.clone(),
                    passed: false,
                    steps_run: i + 1,
                    assertion_results: ctx.assertion_results,
                    error: Some(format!("Step {} failed: {}", i, e)),
                };
            }
        }

        ReplayResult {
            script_name: script.name.clone(),
            passed: ctx.all_passed(),
            steps_run: script.steps.len(),
            assertion_results: ctx.assertion_results,
            error: None,
        }
    }

    fn execute_step(
        &mut self,
        step: &ReplayStep,
        step_index: usize,
        ctx: &mut ReplayContext,
    ) -> Result<(), GarlicError> {
        match step {
            ReplayStep::Bind { selector, options } => {
                self.bind(selector.as_deref(), options)?;
                ctx.record_bind(selector.clone(), options.clone());
                Ok(())
            }

            ReplayStep::Input {
                selector,
                value,
                event,
            } => {
                let node = self.single(selector)?;
                self.doc.set_value(node, value)?;
                self.binder.dispatch(&mut self.doc, node, event);
                Ok(())
            }

            ReplayStep::Check {
                selector,
                checked,
                event,
            } => {
                let node = self.single(selector)?;
                if *checked {
                    self.doc.check(node)?;
                } else {
                    self.doc.set_checked(node, false)?;
                }
                self.binder.dispatch(&mut self.doc, node, event);
                Ok(())
            }

            ReplayStep::Dispatch { selector, event } => {
                let node = self.single(selector)?;
                self.binder.dispatch(&mut self.doc, node, event);
                Ok(())
            }

            ReplayStep::Invoke { selector, method } => {
                let node = self.single(selector)?;
                self.binder.invoke(&mut self.doc, node, *method)?;
                Ok(())
            }

            ReplayStep::Reload => {
                self.doc = self.snapshot.to_document()?;
                self.binder.reset();
                for (selector, options) in ctx.binds.clone() {
                    self.bind(selector.as_deref(), &options)?;
                }
                Ok(())
            }

            ReplayStep::Assert { assertions } => {
                let results = assertions
                    .iter()
                    .map(|spec| self.evaluate_one(spec, step_index))
                    .collect();
                ctx.record_assertions(results);
                Ok(())
            }
        }
    }

    fn bind(&mut self, selector: Option<&str>, options: &GarlicOptions) -> Result<(), GarlicError> {
        let report = match selector {
            Some(sel) => {
                let root = self.single(sel)?;
                self.binder.bind(&mut self.doc, root, options)
            }
            None => self.binder.auto_bind(&mut self.doc),
        };

        match report.errors.first() {
            Some(e) => Err(GarlicError::Script(e.clone())),
            None => Ok(()),
        }
    }

    fn single(&self, selector: &str) -> Result<NodeId, GarlicError> {
        match self.doc.select(selector)?.as_slice() {
            [node] => Ok(*node),
            other => Err(GarlicError::Script(format!(
                "selector '{}' matched {} nodes, expected exactly 1",
                selector,
                other.len()
            ))),
        }
    }

    fn evaluate_one(&self, spec: &AssertionSpec, step_index: usize) -> AssertionResult {
        let (passed, actual, message) = match self.check(spec) {
            Ok((passed, actual, message)) => (passed, actual, message),
            Err(e) => (false, None, Some(format!("Error: {}", e))),
        };

        AssertionResult {
            step_index,
            spec: spec.clone(),
            passed,
            actual,
            message: if passed { None } else { message },
        }
    }

    fn check(&self, spec: &AssertionSpec) -> Result<(bool, Option<String>, Option<String>), GarlicError> {
        let storage = self.binder.storage();

        Ok(match spec {
            AssertionSpec::Stored { selector, expected } => {
                let key = resolve_node(&self.doc, self.single(selector)?)?;
                let actual = storage.get(key.as_str());
                (
                    actual.as_deref() == Some(expected.as_str()),
                    actual.clone(),
                    Some(format!("expected stored {:?}, found {:?}", expected, actual)),
                )
            }
            AssertionSpec::NotStored { selector } => {
                let key = resolve_node(&self.doc, self.single(selector)?)?;
                let actual = storage.get(key.as_str());
                (
                    actual.is_none(),
                    actual.clone(),
                    Some(format!("expected no entry, found {:?}", actual)),
                )
            }
            AssertionSpec::Value { selector, expected } => {
                let actual = self.doc.value(self.single(selector)?);
                (
                    &actual == expected,
                    Some(actual.clone()),
                    Some(format!("expected value {:?}, found {:?}", expected, actual)),
                )
            }
            AssertionSpec::Checked { selector, expected } => {
                let actual = self.doc.is_checked(self.single(selector)?);
                (
                    actual == *expected,
                    Some(actual.to_string()),
                    Some(format!("expected checked={}, found {}", expected, actual)),
                )
            }
            AssertionSpec::Key { selector, expected } => {
                let actual = resolve_node(&self.doc, self.single(selector)?)?.to_string();
                (
                    &actual == expected,
                    Some(actual.clone()),
                    Some(format!("expected key {:?}, found {:?}", expected, actual)),
                )
            }
            AssertionSpec::StoreSize { expected } => {
                let actual = storage
                    .keys()
                    .iter()
                    .filter(|k| k.starts_with(NAMESPACE))
                    .count();
                (
                    actual == *expected,
                    Some(actual.to_string()),
                    Some(format!("expected {} entries, found {}", expected, actual)),
                )
            }
        })
    }
}
