//! `EvaluationContext`: per-state memo of evaluator results.
//!
//! One context is created per open-list extraction or per generated
//! successor and dropped afterwards. Within a context every evaluator is
//! computed at most once, no matter how many combinators ask for it.

use std::collections::HashMap;

use waymark_kernel::task::Cost;

use crate::error::SearchError;
use crate::evaluator::{Estimate, EvaluationResult, Evaluator, EvaluatorId};
use crate::search_space::StateId;

pub struct EvaluationContext<'a, S> {
    state_id: StateId,
    state: &'a S,
    g_value: Cost,
    results: HashMap<EvaluatorId, EvaluationResult>,
    evaluations: u64,
}

impl<'a, S> EvaluationContext<'a, S> {
    /// Context for `state` reached with path cost `g_value`.
    #[must_use]
    pub fn new(state_id: StateId, state: &'a S, g_value: Cost) -> Self {
        Self {
            state_id,
            state,
            g_value,
            results: HashMap::new(),
            evaluations: 0,
        }
    }

    #[must_use]
    pub fn state_id(&self) -> StateId {
        self.state_id
    }

    #[must_use]
    pub fn state(&self) -> &'a S {
        self.state
    }

    #[must_use]
    pub fn g_value(&self) -> Cost {
        self.g_value
    }

    /// Result of `evaluator` for this context's state, computed on first
    /// request and memoized afterwards.
    ///
    /// # Errors
    ///
    /// Propagates the evaluator's contract violation.
    pub fn get_result(
        &mut self,
        evaluator: &dyn Evaluator<S>,
    ) -> Result<EvaluationResult, SearchError> {
        let id = evaluator.id();
        if let Some(result) = self.results.get(&id) {
            return Ok(*result);
        }
        let result = evaluator.compute_result(self)?;
        if result.count_evaluation {
            self.evaluations += 1;
        }
        self.results.insert(id, result);
        Ok(result)
    }

    /// Shorthand for `get_result(evaluator)?.estimate`.
    ///
    /// # Errors
    ///
    /// Propagates the evaluator's contract violation.
    pub fn get_estimate(&mut self, evaluator: &dyn Evaluator<S>) -> Result<Estimate, SearchError> {
        Ok(self.get_result(evaluator)?.estimate)
    }

    /// Whether `evaluator` already has a result in this context.
    #[must_use]
    pub fn is_memoized(&self, evaluator: &dyn Evaluator<S>) -> bool {
        self.results.contains_key(&evaluator.id())
    }

    /// Number of counted (actually computed) evaluations in this context.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}
