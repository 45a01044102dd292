//! Shared helpers for waymark benchmark suites.

use waymark_harness::worlds::grid::{GridWorld, MAZE};
use waymark_harness::worlds::SearchWorld;
use waymark_kernel::task::PlanningTask;
use waymark_search::astar::{shortest_astar, LazyEvaluatorKind, ShortestAstarOptions};
use waymark_search::engine::{SearchOutcome, ShortestEagerSearch};

/// A named benchmark world.
pub struct Regime {
    pub name: &'static str,
    pub world: GridWorld,
}

/// Grid worlds of increasing size plus the built-in maze.
///
/// # Panics
///
/// Panics if a built-in grid fails to parse. Benchmark setup failures are
/// fatal.
#[must_use]
pub fn grid_regimes() -> Vec<Regime> {
    let open = |name: &'static str, side: usize| Regime {
        name,
        world: GridWorld::open(name, side, side).expect("open grid"),
    };
    vec![
        open("open_16", 16),
        open("open_32", 32),
        open("open_64", 64),
        Regime {
            name: "maze",
            world: GridWorld::by_id(MAZE)
                .expect("maze parses")
                .expect("maze is built in"),
        },
    ]
}

/// Options for the plain configuration and each lazy variant.
#[must_use]
pub fn option_variants() -> Vec<(&'static str, ShortestAstarOptions)> {
    [
        ("eager", LazyEvaluatorKind::None),
        ("lazy_h", LazyEvaluatorKind::Heuristic),
        ("lazy_d", LazyEvaluatorKind::Distance),
    ]
    .into_iter()
    .map(|(name, lazy)| {
        (
            name,
            ShortestAstarOptions {
                lazy,
                ..ShortestAstarOptions::default()
            },
        )
    })
    .collect()
}

/// Build a fresh configuration and run the engine to completion, without
/// report serialization.
///
/// # Panics
///
/// Panics if the configuration is rejected or the search aborts. Benchmark
/// runs are expected to succeed.
pub fn run_engine_only<W>(world: &W, options: &ShortestAstarOptions) -> SearchOutcome
where
    W: SearchWorld,
    <W::Task as PlanningTask>::State: 'static,
{
    let heuristic = world.heuristic(options.evaluator_options);
    let config = shortest_astar(heuristic, options).expect("valid configuration");
    let mut engine = ShortestEagerSearch::new(world.task(), config).expect("valid engine");
    engine.search().expect("search should succeed in benchmarks")
}
