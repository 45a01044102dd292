//! Evaluator capability: estimates, results and the `Evaluator` trait.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use waymark_kernel::task::{Cost, OperatorId};

use crate::context::EvaluationContext;
use crate::error::SearchError;
use crate::search_space::StateId;

/// A numeric estimate or the dead-end marker.
///
/// Ordering: every finite value sorts before `DeadEnd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Estimate {
    Finite(i64),
    DeadEnd,
}

impl Estimate {
    #[must_use]
    pub fn is_dead_end(self) -> bool {
        matches!(self, Self::DeadEnd)
    }

    /// The finite value, or `None` for a dead end.
    #[must_use]
    pub fn value(self) -> Option<i64> {
        match self {
            Self::Finite(v) => Some(v),
            Self::DeadEnd => None,
        }
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(v) => write!(f, "{v}"),
            Self::DeadEnd => f.write_str("infinity"),
        }
    }
}

/// Result of evaluating one evaluator on one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationResult {
    pub estimate: Estimate,
    /// True if an actual computation happened (not a cache hit or a plain
    /// read). Only counted evaluations enter the statistics.
    pub count_evaluation: bool,
}

impl EvaluationResult {
    #[must_use]
    pub fn computed(estimate: Estimate) -> Self {
        Self {
            estimate,
            count_evaluation: true,
        }
    }

    #[must_use]
    pub fn read(estimate: Estimate) -> Self {
        Self {
            estimate,
            count_evaluation: false,
        }
    }
}

/// Process-unique evaluator identity, used as the memo key of an
/// [`EvaluationContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EvaluatorId(u64);

impl EvaluatorId {
    /// Allocate a fresh identity.
    #[must_use]
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// How operator costs are read by an evaluator or by the engine's g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    /// True operator cost.
    #[default]
    Normal,
    /// Every operator costs 1 (path length).
    One,
    /// True cost plus 1.
    PlusOne,
}

impl CostType {
    #[must_use]
    pub fn adjust(self, cost: Cost) -> Cost {
        match self {
            Self::Normal => cost,
            Self::One => 1,
            Self::PlusOne => cost.saturating_add(1),
        }
    }
}

/// A state transition reported to path-dependent evaluators.
///
/// `cost` is the true operator cost; each evaluator applies its own
/// [`CostType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub parent: StateId,
    pub operator: OperatorId,
    pub cost: Cost,
    pub child: StateId,
}

/// Estimate capability over states of type `S`.
///
/// Evaluators are shared by reference (`Rc`) across the run and across many
/// evaluation contexts. They are mutated only through their own
/// notification methods.
pub trait Evaluator<S> {
    /// Identity used to memoize results within one context.
    fn id(&self) -> EvaluatorId;

    fn name(&self) -> &str;

    /// Compute the result for the context's state.
    ///
    /// Called at most once per context; callers go through
    /// [`EvaluationContext::get_result`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] when an evaluation contract is violated
    /// (e.g. querying a path-dependent value that was never notified).
    fn compute_result(
        &self,
        ctx: &mut EvaluationContext<'_, S>,
    ) -> Result<EvaluationResult, SearchError>;

    /// True if values depend on the path by which a state was reached.
    /// The engine notifies exactly these evaluators of transitions.
    fn is_path_dependent(&self) -> bool {
        false
    }

    /// True if a dead end reported by this evaluator is a proof of
    /// unsolvability.
    fn dead_ends_are_reliable(&self) -> bool {
        true
    }

    /// Called once with the start state before any other notification.
    ///
    /// # Errors
    ///
    /// Implementations may reject a notification that breaks their contract.
    fn notify_initial_state(&self, _state: StateId) -> Result<(), SearchError> {
        Ok(())
    }

    /// Called for every generated transition, in generation order.
    ///
    /// # Errors
    ///
    /// Implementations may reject a notification that breaks their contract.
    fn notify_state_transition(&self, _transition: &Transition) -> Result<(), SearchError> {
        Ok(())
    }
}
