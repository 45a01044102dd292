use std::cell::RefCell;
use std::marker::PhantomData;

use crate::cache::{CacheEntry, EstimateCache, EvaluatorOptions};
use crate::context::EvaluationContext;
use crate::error::SearchError;
use crate::evaluator::{Estimate, EvaluationResult, Evaluator, EvaluatorId};
use crate::search_space::StateId;

/// A raw heuristic given as a function of the state.
///
/// With caching enabled, a fresh cached estimate is returned without
/// calling the function. [`FnHeuristic::invalidate`] marks a state's value
/// as needing recomputation; the next context that asks for it calls the
/// function again.
pub struct FnHeuristic<S, F> {
    id: EvaluatorId,
    name: String,
    compute: F,
    cache: Option<RefCell<EstimateCache>>,
    _state: PhantomData<fn(&S)>,
}

impl<S, F> FnHeuristic<S, F>
where
    F: Fn(&S) -> Estimate,
{
    #[must_use]
    pub fn new(name: &str, options: EvaluatorOptions, compute: F) -> Self {
        Self {
            id: EvaluatorId::fresh(),
            name: name.to_string(),
            compute,
            cache: options
                .cache_estimates
                .then(|| RefCell::new(EstimateCache::new())),
            _state: PhantomData,
        }
    }

    /// Mark `state`'s cached estimate as stale. Returns `false` without a
    /// cache or without a cached value.
    pub fn invalidate(&self, state: StateId) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|c| c.borrow_mut().invalidate(state))
    }

    /// Cached entry for `state` (`Absent` without a cache).
    #[must_use]
    pub fn cached(&self, state: StateId) -> CacheEntry {
        self.cache
            .as_ref()
            .map_or(CacheEntry::Absent, |c| c.borrow().lookup(state))
    }
}

impl<S, F> Evaluator<S> for FnHeuristic<S, F>
where
    F: Fn(&S) -> Estimate,
{
    fn id(&self) -> EvaluatorId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn compute_result(
        &self,
        ctx: &mut EvaluationContext<'_, S>,
    ) -> Result<EvaluationResult, SearchError> {
        let Some(cache) = &self.cache else {
            return Ok(EvaluationResult::computed((self.compute)(ctx.state())));
        };
        if let CacheEntry::Fresh(estimate) = cache.borrow().lookup(ctx.state_id()) {
            return Ok(EvaluationResult::read(estimate));
        }
        let estimate = (self.compute)(ctx.state());
        cache.borrow_mut().store(ctx.state_id(), estimate);
        Ok(EvaluationResult::computed(estimate))
    }
}
