//! The planning task boundary.
//!
//! The search core never inspects states directly. It asks the task for the
//! initial state, the goal predicate, the applicable operators and their
//! costs, and for the successor produced by applying an operator.

pub mod graph;

use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

/// Operator cost. Costs are non-negative; `i64` keeps sums of long paths
/// from overflowing in practice and matches the signed estimate domain.
pub type Cost = i64;

/// Dense operator identifier, stable for the lifetime of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperatorId(u32);

impl OperatorId {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for OperatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "op#{}", self.0)
    }
}

/// A state space given implicitly by an initial state and operators.
///
/// # Contract
///
/// - `apply` is only called with operators returned by
///   `applicable_operators` for the same state, and always yields exactly
///   one successor.
/// - `applicable_operators` is deterministic: same state, same operators in
///   the same order. The search notifies transitions in this order.
/// - `operator_cost` is non-negative.
pub trait PlanningTask {
    /// Immutable state value, compared by value equality.
    type State: Clone + Eq + Hash + Debug;

    fn initial_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    fn applicable_operators(&self, state: &Self::State) -> Vec<OperatorId>;

    fn apply(&self, state: &Self::State, op: OperatorId) -> Self::State;

    fn operator_cost(&self, op: OperatorId) -> Cost;

    fn operator_name(&self, op: OperatorId) -> &str;

    fn operator_count(&self) -> usize;
}

/// Failure while building a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("operator {operator} has negative cost {cost}")]
    NegativeCost { operator: String, cost: Cost },
    #[error("unknown state {name}")]
    UnknownState { name: String },
    #[error("no initial state was declared")]
    MissingInitialState,
    #[error("too many {what} for a 32-bit index")]
    TooLarge { what: &'static str },
}
