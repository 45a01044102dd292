//! Small explicit graphs, each pinning down one behavior of the search.
//!
//! The heuristic of a scenario is its graph's table: vertices without an
//! entry estimate 0, vertices marked as dead ends report a dead end.

use std::rc::Rc;

use waymark_kernel::task::graph::{GraphState, GraphTask};
use waymark_kernel::task::TaskError;
use waymark_search::cache::EvaluatorOptions;
use waymark_search::evaluator::{Estimate, Evaluator};
use waymark_search::evaluators::FnHeuristic;

use super::SearchWorld;

pub const DIAMOND: &str = "diamond";
pub const START_IS_GOAL: &str = "start_is_goal";
pub const UNREACHABLE: &str = "unreachable";
pub const STALE_DESCENDANT: &str = "stale_descendant";
pub const REOPENING: &str = "reopening";
pub const LAZY_DISTANCE: &str = "lazy_distance";

/// A named [`GraphTask`] with its table heuristic.
#[derive(Debug, Clone)]
pub struct GraphWorld {
    world_id: String,
    task: GraphTask,
}

impl GraphWorld {
    #[must_use]
    pub fn new(world_id: &str, task: GraphTask) -> Self {
        Self {
            world_id: world_id.to_string(),
            task,
        }
    }

    /// Look up a scenario by id.
    ///
    /// # Errors
    ///
    /// Propagates a [`TaskError`] from building the graph. Unknown ids
    /// return `Ok(None)`.
    pub fn by_id(world_id: &str) -> Result<Option<Self>, TaskError> {
        let world = match world_id {
            DIAMOND => diamond()?,
            START_IS_GOAL => start_is_goal()?,
            UNREACHABLE => unreachable()?,
            STALE_DESCENDANT => stale_descendant()?,
            REOPENING => reopening()?,
            LAZY_DISTANCE => lazy_distance()?,
            _ => return Ok(None),
        };
        Ok(Some(world))
    }
}

impl SearchWorld for GraphWorld {
    type Task = GraphTask;

    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn task(&self) -> &GraphTask {
        &self.task
    }

    fn heuristic(&self, options: EvaluatorOptions) -> Rc<dyn Evaluator<GraphState>> {
        let table = self.task.clone();
        Rc::new(FnHeuristic::new("table", options, move |s: &GraphState| {
            table
                .table_estimate(*s)
                .map_or(Estimate::DeadEnd, Estimate::Finite)
        }))
    }
}

/// `s0 -a(1)-> s1 -c(1)-> s2` beats `s0 -b(5)-> s2`.
///
/// # Errors
///
/// Never fails for this fixed graph; the `Result` mirrors the builder.
pub fn diamond() -> Result<GraphWorld, TaskError> {
    let task = GraphTask::builder()
        .edge("a", "s0", "s1", 1)
        .edge("c", "s1", "s2", 1)
        .edge("b", "s0", "s2", 5)
        .initial("s0")
        .goal("s2")
        .build()?;
    Ok(GraphWorld::new(DIAMOND, task))
}

/// The initial state already satisfies the goal.
///
/// # Errors
///
/// Never fails for this fixed graph.
pub fn start_is_goal() -> Result<GraphWorld, TaskError> {
    let task = GraphTask::builder()
        .edge("a", "s0", "s1", 1)
        .initial("s0")
        .goal("s0")
        .build()?;
    Ok(GraphWorld::new(START_IS_GOAL, task))
}

/// A cycle with no edge into the goal.
///
/// # Errors
///
/// Never fails for this fixed graph.
pub fn unreachable() -> Result<GraphWorld, TaskError> {
    let task = GraphTask::builder()
        .edge("a", "s0", "s1", 1)
        .edge("b", "s1", "s2", 1)
        .edge("c", "s2", "s0", 1)
        .state("goal")
        .initial("s0")
        .goal("goal")
        .build()?;
    Ok(GraphWorld::new(UNREACHABLE, task))
}

/// `a → b → c → d` with costs 1, 1, 1 and a direct `a → c` of cost 5.
///
/// Used to replay transitions in a hand-picked order against the
/// path-cost evaluator; searching it finds `a, b, c, d` with cost 3.
///
/// # Errors
///
/// Never fails for this fixed graph.
pub fn stale_descendant() -> Result<GraphWorld, TaskError> {
    let task = GraphTask::builder()
        .edge("a_b", "a", "b", 1)
        .edge("b_c", "b", "c", 1)
        .edge("a_c", "a", "c", 5)
        .edge("c_d", "c", "d", 1)
        .initial("a")
        .goal("d")
        .build()?;
    Ok(GraphWorld::new(STALE_DESCENDANT, task))
}

/// An admissible but inconsistent heuristic on `b` closes `c` through the
/// expensive edge first; expanding `b` then reopens `c`.
///
/// # Errors
///
/// Never fails for this fixed graph.
pub fn reopening() -> Result<GraphWorld, TaskError> {
    let task = GraphTask::builder()
        .edge("s0_b", "s0", "b", 1)
        .edge("s0_c", "s0", "c", 3)
        .edge("b_c", "b", "c", 1)
        .edge("c_g", "c", "g", 10)
        .estimate("b", 10)
        .initial("s0")
        .goal("g")
        .build()?;
    Ok(GraphWorld::new(REOPENING, task))
}

/// `t1` is first reached in three steps. Expanding `c1` later reveals a
/// two-step path that costs more, so only the unit-cost tie-breaker of `t1`
/// drops between insertion and extraction.
///
/// # Errors
///
/// Never fails for this fixed graph.
pub fn lazy_distance() -> Result<GraphWorld, TaskError> {
    let task = GraphTask::builder()
        .edge("a", "s0", "a1", 1)
        .edge("b", "a1", "b1", 1)
        .edge("t", "b1", "t1", 1)
        .edge("c", "s0", "c1", 1)
        .edge("u", "c1", "t1", 5)
        .edge("g", "t1", "goal", 1)
        .estimate("c1", 2)
        .initial("s0")
        .goal("goal")
        .build()?;
    Ok(GraphWorld::new(LAZY_DISTANCE, task))
}
