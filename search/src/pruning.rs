//! Applicable-operator pruning collaborator.

use waymark_kernel::task::OperatorId;

/// Filters the applicable operators of a state before expansion.
///
/// Implementations may only remove operators; order of the survivors must
/// be preserved, since it fixes the notification order.
pub trait PruningMethod<S> {
    fn name(&self) -> &str;

    /// Called once before the search starts.
    fn initialize(&mut self) {}

    fn prune_operators(&mut self, state: &S, operators: &mut Vec<OperatorId>);
}

/// Keeps every operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPruning;

impl<S> PruningMethod<S> for NullPruning {
    fn name(&self) -> &str {
        "null"
    }

    fn prune_operators(&mut self, _state: &S, _operators: &mut Vec<OperatorId>) {}
}

/// Drops a fixed set of operators everywhere. Mostly useful in tests.
#[derive(Debug, Clone, Default)]
pub struct BlockedOperators {
    blocked: Vec<OperatorId>,
}

impl BlockedOperators {
    #[must_use]
    pub fn new(blocked: Vec<OperatorId>) -> Self {
        Self { blocked }
    }
}

impl<S> PruningMethod<S> for BlockedOperators {
    fn name(&self) -> &str {
        "blocked_operators"
    }

    fn prune_operators(&mut self, _state: &S, operators: &mut Vec<OperatorId>) {
        operators.retain(|op| !self.blocked.contains(op));
    }
}
