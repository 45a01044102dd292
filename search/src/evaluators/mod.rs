//! Evaluator variants.
//!
//! - raw: [`ConstEvaluator`], [`FnHeuristic`]
//! - path-dependent: [`GEvaluator`] (reads the context g), [`PathCostEvaluator`]
//! - combinators: [`SumEvaluator`], [`TieBreakingEvaluator`]

mod constant;
mod g;
mod heuristic;
mod path_cost;
mod sum;
mod tiebreaking;

pub use constant::ConstEvaluator;
pub use g::GEvaluator;
pub use heuristic::FnHeuristic;
pub use path_cost::PathCostEvaluator;
pub use sum::SumEvaluator;
pub use tiebreaking::TieBreakingEvaluator;
