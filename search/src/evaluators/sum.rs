use std::rc::Rc;

use crate::context::EvaluationContext;
use crate::error::SearchError;
use crate::evaluator::{Estimate, EvaluationResult, Evaluator, EvaluatorId, Transition};
use crate::search_space::StateId;

/// Sum of sub-evaluators. A dead end in any child makes the sum a dead end;
/// children after it are not evaluated.
pub struct SumEvaluator<S> {
    id: EvaluatorId,
    children: Vec<Rc<dyn Evaluator<S>>>,
}

impl<S> SumEvaluator<S> {
    #[must_use]
    pub fn new(children: Vec<Rc<dyn Evaluator<S>>>) -> Self {
        Self {
            id: EvaluatorId::fresh(),
            children,
        }
    }
}

impl<S> Evaluator<S> for SumEvaluator<S> {
    fn id(&self) -> EvaluatorId {
        self.id
    }

    fn name(&self) -> &str {
        "sum"
    }

    fn compute_result(
        &self,
        ctx: &mut EvaluationContext<'_, S>,
    ) -> Result<EvaluationResult, SearchError> {
        let mut total: i64 = 0;
        for child in &self.children {
            match ctx.get_estimate(child.as_ref())? {
                Estimate::Finite(v) => total = total.saturating_add(v),
                Estimate::DeadEnd => return Ok(EvaluationResult::read(Estimate::DeadEnd)),
            }
        }
        Ok(EvaluationResult::read(Estimate::Finite(total)))
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
