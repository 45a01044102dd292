use crate::context::EvaluationContext;
use crate::error::SearchError;
use crate::evaluator::{Estimate, EvaluationResult, Evaluator, EvaluatorId};

/// Returns the same estimate for every state. `ConstEvaluator::new(0)` is
/// the blind heuristic.
#[derive(Debug)]
pub struct ConstEvaluator {
    id: EvaluatorId,
    estimate: Estimate,
}

impl ConstEvaluator {
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self {
            id: EvaluatorId::fresh(),
            estimate: Estimate::Finite(value),
        }
    }
}

impl<S> Evaluator<S> for ConstEvaluator {
    fn id(&self) -> EvaluatorId {
        self.id
    }

    fn name(&self) -> &str {
        "const"
    }

    fn compute_result(
        &self,
        _ctx: &mut EvaluationContext<'_, S>,
    ) -> Result<EvaluationResult, SearchError> {
        Ok(EvaluationResult::read(self.estimate))
    }
}
