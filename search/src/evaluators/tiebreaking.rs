use std::rc::Rc;

use crate::context::EvaluationContext;
use crate::error::SearchError;
use crate::evaluator::{Estimate, EvaluationResult, Evaluator, EvaluatorId, Transition};
use crate::search_space::StateId;

/// Composite ordering key: the first child is the primary key, each further
/// child breaks ties among equal prefixes.
///
/// The composite is not path-dependent itself; it forwards notifications to
/// its children. If any child reports a dead end the whole key is a dead
/// end and later children are not evaluated.
pub struct TieBreakingEvaluator<S> {
    id: EvaluatorId,
    children: Vec<Rc<dyn Evaluator<S>>>,
}

impl<S> TieBreakingEvaluator<S> {
    #[must_use]
    pub fn new(children: Vec<Rc<dyn Evaluator<S>>>) -> Self {
        Self {
            id: EvaluatorId::fresh(),
            children,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Rc<dyn Evaluator<S>>] {
        &self.children
    }

    /// The key vector for the context's state, or `None` for a dead end.
    ///
    /// # Errors
    ///
    /// Propagates a child's contract violation.
    pub fn evaluate_key(
        &self,
        ctx: &mut EvaluationContext<'_, S>,
    ) -> Result<Option<Vec<i64>>, SearchError> {
        let mut key = Vec::with_capacity(self.children.len());
        for child in &self.children {
            match ctx.get_estimate(child.as_ref())? {
                Estimate::Finite(v) => key.push(v),
                Estimate::DeadEnd => return Ok(None),
            }
        }
        Ok(Some(key))
    }
}

impl<S> Evaluator<S> for TieBreakingEvaluator<S> {
    fn id(&self) -> EvaluatorId {
        self.id
    }

    fn name(&self) -> &str {
        "tiebreaking"
    }

    /// The primary key component, or a dead end if any component is one.
    fn compute_result(
        &self,
        ctx: &mut EvaluationContext<'_, S>,
    ) -> Result<EvaluationResult, SearchError> {
        let estimate = match self.evaluate_key(ctx)? {
            Some(key) => key.first().copied().map_or(Estimate::Finite(0), Estimate::Finite),
            None => Estimate::DeadEnd,
        };
        Ok(EvaluationResult::read(estimate))
    }

    fn is_path_dependent(&self) -> bool {
        self.children.iter().any(|c| c.is_path_dependent())
    }

    fn dead_ends_are_reliable(&self) -> bool {
        self.children.iter().all(|c| c.dead_ends_are_reliable())
    }

    fn notify_initial_state(&self, state: StateId) -> Result<(), SearchError> {
        for child in &self.children {
            child.notify_initial_state(state)?;
        }
        Ok(())
    }

    fn notify_state_transition(&self, transition: &Transition) -> Result<(), SearchError> {
        for child in &self.children {
            child.notify_state_transition(transition)?;
        }
        Ok(())
    }
}
