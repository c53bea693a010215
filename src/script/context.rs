use crate::field::config::GarlicOptions;
use crate::script::script_model::AssertionResult;

/// Tracks the execution state and results of a running replay.
#[derive(Debug, Clone)]
pub struct ReplayContext {
    /// Current step index (0-based)
    pub current_step: usize,

    pub assertion_results: Vec<AssertionResult>,

    /// Bind steps seen so far, replayed on every reload
    pub binds: Vec<(Option<String>, GarlicOptions)>,
}

impl ReplayContext {
    pub fn new() -> Self {
        ReplayContext {
            current_step: 0,
            assertion_results: Vec::new(),
            binds: Vec::new(),
        }
    }

    pub fn record_assertions(&mut self, results: Vec<AssertionResult>) {
        self.assertion_results.extend(results);
    }

    pub fn record_bind(&mut self, selector: Option<String>, options: GarlicOptions) {
        self.binds.push((selector, options));
    }

    pub fn all_passed(&self) -> bool {
        self.assertion_results.iter().all(|r| r.passed)
    }

    pub fn pass_count(&self) -> usize {
        self.assertion_results.iter().filter(|r| r.passed).count()
    }

    pub fn fail_count(&self) -> usize {
        self.assertion_results.iter().filter(|r| !r.passed).count()
    }
}

impl Default for ReplayContext {
    fn default() -> Self {
        Self::new()
    }
}
