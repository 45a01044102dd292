//! Path-dependent g-evaluator.
//!
//! Reports the best path cost known for a state, computed incrementally from
//! transition notifications. Notifications are the only mutation path:
//! [`PathCostEvaluator::compute_result`] never computes anything, it reads
//! the cache.
//!
//! # Notification order
//!
//! Values are updated opportunistically when a transition is notified.
//! Consider transitions `A → B → C → D` and `A → C` where `A → B → C` is
//! cheaper than `A → C`. If `A → C` and then `C → D` are notified before
//! `A → B → C`, the value of D is based on the expensive path to C. The later
//! improvement of C is NOT propagated to D.
//!
//! Cached values equal true shortest-path costs only if the driving search
//! notifies transitions in non-decreasing order of the parent's true cost
//! (as Dijkstra-like expansion does). Any other order may leave suboptimal
//! values in the cache without any error being reported.

use std::cell::RefCell;

use crate::cache::{CacheEntry, EstimateCache, EvaluatorOptions};
use crate::context::EvaluationContext;
use crate::error::{ConfigError, SearchError};
use crate::evaluator::{CostType, Estimate, EvaluationResult, Evaluator, EvaluatorId, Transition};
use crate::search_space::StateId;

#[derive(Debug)]
pub struct PathCostEvaluator {
    id: EvaluatorId,
    name: String,
    cost_type: CostType,
    cache: RefCell<EstimateCache>,
}

impl PathCostEvaluator {
    /// Create an evaluator that reads operator costs through `cost_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CachingDisabled`] if `options` disable estimate
    /// caching: without a persistent cache there is nothing to report.
    pub fn new(cost_type: CostType, options: EvaluatorOptions) -> Result<Self, ConfigError> {
        let name = match cost_type {
            CostType::Normal => "path_cost",
            CostType::One => "path_cost(one)",
            CostType::PlusOne => "path_cost(plusone)",
        };
        if !options.cache_estimates {
            return Err(ConfigError::CachingDisabled {
                evaluator: name.to_string(),
            });
        }
        tracing::debug!(evaluator = name, "initializing path cost evaluator");
        Ok(Self {
            id: EvaluatorId::fresh(),
            name: name.to_string(),
            cost_type,
            cache: RefCell::new(EstimateCache::new()),
        })
    }

    /// Seed the start state with value 0.
    pub fn initialize(&self, start: StateId) {
        self.cache.borrow_mut().store(start, Estimate::Finite(0));
    }

    /// Record `transition`. Writes `g(parent) + cost` into the child's slot
    /// if the child is uncached or the value is strictly smaller; otherwise
    /// does nothing. Returns whether a write happened.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UncachedParent`] if the parent has no cached
    /// value.
    pub fn on_transition(&self, transition: &Transition) -> Result<bool, SearchError> {
        let parent_g = match self.cache.borrow().lookup(transition.parent) {
            CacheEntry::Fresh(Estimate::Finite(g)) | CacheEntry::NeedsRecompute(Estimate::Finite(g)) => g,
            _ => {
                return Err(SearchError::UncachedParent {
                    evaluator: self.name.clone(),
                    state: transition.parent,
                })
            }
        };
        let candidate = parent_g.saturating_add(self.cost_type.adjust(transition.cost));
        Ok(self
            .cache
            .borrow_mut()
            .write_if_better(transition.child, candidate))
    }

    /// Best known value for `state`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnnotifiedState`] if no notification ever
    /// reached `state`.
    pub fn get(&self, state: StateId) -> Result<i64, SearchError> {
        match self.cache.borrow().lookup(state) {
            CacheEntry::Fresh(Estimate::Finite(g)) | CacheEntry::NeedsRecompute(Estimate::Finite(g)) => Ok(g),
            _ => Err(SearchError::UnnotifiedState {
                evaluator: self.name.clone(),
                state,
            }),
        }
    }
}

impl<S> Evaluator<S> for PathCostEvaluator {
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
        let g = self.get(ctx.state_id())?;
        Ok(EvaluationResult::read(Estimate::Finite(g)))
    }

    fn is_path_dependent(&self) -> bool {
        true
    }

    fn notify_initial_state(&self, state: StateId) -> Result<(), SearchError> {
        self.initialize(state);
        Ok(())
    }

    fn notify_state_transition(&self, transition: &Transition) -> Result<(), SearchError> {
        self.on_transition(transition).map(|_| ())
    }
}
