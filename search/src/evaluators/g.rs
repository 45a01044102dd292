use crate::context::EvaluationContext;
use crate::error::SearchError;
use crate::evaluator::{Estimate, EvaluationResult, Evaluator, EvaluatorId};

/// The g-value the engine recorded for the context's state.
///
/// Stateless: the value travels in the [`EvaluationContext`], so no
/// notifications are needed.
#[derive(Debug)]
pub struct GEvaluator {
    id: EvaluatorId,
}

impl GEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: EvaluatorId::fresh(),
        }
    }
}

impl Default for GEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Evaluator<S> for GEvaluator {
    fn id(&self) -> EvaluatorId {
        self.id
    }

    fn name(&self) -> &str {
        "g"
    }

    fn compute_result(
        &self,
        ctx: &mut EvaluationContext<'_, S>,
    ) -> Result<EvaluationResult, SearchError> {
        Ok(EvaluationResult::read(Estimate::Finite(ctx.g_value())))
    }
}
