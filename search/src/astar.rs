//! Fixed A* wiring for [`ShortestEagerSearch`](crate::engine::ShortestEagerSearch).
//!
//! The open list is ordered by `[g + h, d, h]`, where `d` is the
//! path-dependent cost evaluator over unit operator costs: among states of
//! equal f, those reached by fewer steps come first, then those with lower h.
//! Closed nodes are reopened and no preferred operators are used.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::cache::EvaluatorOptions;
use crate::error::ConfigError;
use crate::evaluator::{CostType, Evaluator};
use crate::evaluators::{GEvaluator, PathCostEvaluator, SumEvaluator, TieBreakingEvaluator};
use crate::policy::SearchLimits;

/// Which evaluator, if any, is re-applied when a state is extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LazyEvaluatorKind {
    #[default]
    #[serde(rename = "none")]
    None,
    /// The raw heuristic.
    #[serde(rename = "h")]
    Heuristic,
    /// The unit-cost path evaluator used as first tie-breaker.
    #[serde(rename = "d")]
    Distance,
}

/// User-facing options of the A* variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortestAstarOptions {
    pub lazy: LazyEvaluatorKind,
    /// Cost type of the engine's g (and therefore of f).
    pub cost_type: CostType,
    pub limits: SearchLimits,
    /// Options handed to the path-dependent tie-breaker.
    pub evaluator_options: EvaluatorOptions,
}

/// Engine configuration, validated by
/// [`ShortestEagerSearch::new`](crate::engine::ShortestEagerSearch::new).
pub struct ShortestAstarConfig<S> {
    /// Produces the open-list key.
    pub open_evaluator: Rc<TieBreakingEvaluator<S>>,
    /// Re-applied on extraction when present.
    pub lazy_evaluator: Option<Rc<dyn Evaluator<S>>>,
    /// Must stay empty for this engine.
    pub preferred_evaluators: Vec<Rc<dyn Evaluator<S>>>,
    /// Must stay `true` for this engine.
    pub reopen_closed: bool,
    pub cost_type: CostType,
    pub limits: SearchLimits,
}

/// Wire `[g + h, d, h]` around the heuristic `h`.
///
/// # Errors
///
/// Returns [`ConfigError::CachingDisabled`] if `options` disable the
/// estimate cache the `d` tie-breaker depends on.
pub fn shortest_astar<S: 'static>(
    h: Rc<dyn Evaluator<S>>,
    options: &ShortestAstarOptions,
) -> Result<ShortestAstarConfig<S>, ConfigError> {
    let d: Rc<dyn Evaluator<S>> = Rc::new(PathCostEvaluator::new(
        CostType::One,
        options.evaluator_options,
    )?);
    let g: Rc<dyn Evaluator<S>> = Rc::new(GEvaluator::new());
    let f: Rc<dyn Evaluator<S>> = Rc::new(SumEvaluator::new(vec![g, Rc::clone(&h)]));

    let lazy_evaluator = match options.lazy {
        LazyEvaluatorKind::None => None,
        LazyEvaluatorKind::Heuristic => Some(Rc::clone(&h)),
        LazyEvaluatorKind::Distance => Some(Rc::clone(&d)),
    };

    Ok(ShortestAstarConfig {
        open_evaluator: Rc::new(TieBreakingEvaluator::new(vec![f, d, h])),
        lazy_evaluator,
        preferred_evaluators: Vec::new(),
        reopen_closed: true,
        cost_type: options.cost_type,
        limits: options.limits,
    })
}
