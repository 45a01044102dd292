//! Worlds for the harness runner.
//!
//! A world bundles a planning task with the heuristic the runner wires into
//! the A* key. Every world has a stable id that ends up in its reports.

pub mod grid;
pub mod scenarios;

use std::rc::Rc;

use waymark_kernel::task::PlanningTask;
use waymark_search::cache::EvaluatorOptions;
use waymark_search::evaluator::Evaluator;

/// A task plus its heuristic.
pub trait SearchWorld {
    type Task: PlanningTask;

    /// Stable identifier, bound into reports.
    fn world_id(&self) -> &str;

    fn task(&self) -> &Self::Task;

    /// A fresh heuristic evaluator for one run.
    fn heuristic(
        &self,
        options: EvaluatorOptions,
    ) -> Rc<dyn Evaluator<<Self::Task as PlanningTask>::State>>;
}

/// Ids accepted by [`crate::runner::run_world_by_id`].
pub const WORLD_IDS: &[&str] = &[
    scenarios::DIAMOND,
    scenarios::START_IS_GOAL,
    scenarios::UNREACHABLE,
    scenarios::STALE_DESCENDANT,
    scenarios::REOPENING,
    scenarios::LAZY_DISTANCE,
    grid::OPEN_GRID,
    grid::MAZE,
];
