//! End-to-end search scenarios: plans, failure, reopening, lazy
//! re-evaluation and construction-time rejection.

use waymark_harness::config::SearchConfigV1;
use waymark_harness::runner::{run_search, run_world_by_id, RunError};
use waymark_harness::worlds::grid::{GridWorld, MAZE};
use waymark_harness::worlds::scenarios::{self, GraphWorld};
use waymark_harness::worlds::SearchWorld;
use waymark_kernel::task::graph::GraphTask;
use waymark_search::astar::{shortest_astar, LazyEvaluatorKind, ShortestAstarOptions};
use waymark_search::cache::EvaluatorOptions;
use waymark_search::engine::{SearchStatus, ShortestEagerSearch};
use waymark_search::error::ConfigError;
use waymark_search::evaluator::CostType;
use waymark_search::evaluators::PathCostEvaluator;
use waymark_search::search_space::NodeStatus;

fn default_run(world_id: &str) -> waymark_harness::runner::SearchReportV1 {
    run_world_by_id(world_id, &SearchConfigV1::default()).expect("search run failed")
}

// ---------------------------------------------------------------------------
// Basic outcomes
// ---------------------------------------------------------------------------

#[test]
fn diamond_takes_the_cheap_two_step_path() {
    let report = default_run(scenarios::DIAMOND);
    assert_eq!(report.status, SearchStatus::Solved);
    let plan = report.plan.expect("plan");
    assert_eq!(plan.operator_names(), vec!["a", "c"]);
    assert_eq!(plan.cost, 2);
}

#[test]
fn start_state_goal_yields_empty_plan() {
    let report = default_run(scenarios::START_IS_GOAL);
    assert_eq!(report.status, SearchStatus::Solved);
    let plan = report.plan.expect("plan");
    assert!(plan.is_empty());
    assert_eq!(plan.cost, 0);
    assert_eq!(report.statistics.expanded, 0);
}

#[test]
fn unreachable_goal_fails_after_exhaustion() {
    let report = default_run(scenarios::UNREACHABLE);
    assert_eq!(report.status, SearchStatus::Failed);
    assert!(report.plan.is_none());
    assert_eq!(report.statistics.expanded, 3);
    assert!(report
        .search_space
        .iter()
        .filter(|e| e.status != NodeStatus::New)
        .all(|e| e.status == NodeStatus::Closed));
}

#[test]
fn maze_plan_is_optimal() {
    let report = default_run(MAZE);
    assert_eq!(report.status, SearchStatus::Solved);
    assert_eq!(report.plan.expect("plan").cost, 26);
    assert_eq!(report.statistics.reopened, 0);
}

#[test]
fn unit_cost_type_counts_steps() {
    let config = SearchConfigV1 {
        cost_type: CostType::One,
        ..SearchConfigV1::default()
    };
    let report = run_world_by_id(scenarios::DIAMOND, &config).expect("search run failed");
    // Under unit costs the direct edge is the shortest plan; the reported
    // cost is still the true cost.
    let plan = report.plan.expect("plan");
    assert_eq!(plan.operator_names(), vec!["b"]);
    assert_eq!(plan.cost, 5);
}

// ---------------------------------------------------------------------------
// Reopening
// ---------------------------------------------------------------------------

#[test]
fn strictly_improved_closed_state_is_reopened() {
    let report = default_run(scenarios::REOPENING);
    assert_eq!(report.statistics.reopened, 1);
    let plan = report.plan.expect("plan");
    assert_eq!(plan.operator_names(), vec!["s0_b", "b_c", "c_g"]);
    assert_eq!(plan.cost, 12);
}

#[test]
fn equal_or_worse_path_keeps_state_closed() {
    let task = GraphTask::builder()
        .edge("a", "s0", "s1", 1)
        .edge("back", "s1", "s0", 1)
        .edge("b", "s0", "s2", 2)
        .edge("c", "s1", "s2", 1)
        .edge("d", "s2", "goal", 5)
        .initial("s0")
        .goal("goal")
        .build()
        .expect("valid graph");
    let world = GraphWorld::new("closed_stays_closed", task);
    let report = run_search(&world, &SearchConfigV1::default()).expect("search run failed");
    assert_eq!(report.statistics.reopened, 0);
    let s0 = &report.search_space[0];
    assert_eq!(s0.status, NodeStatus::Closed);
    assert_eq!(s0.g, 0);
    assert_eq!(s0.parent, None);
}

// ---------------------------------------------------------------------------
// Lazy re-evaluation
// ---------------------------------------------------------------------------

#[test]
fn changed_lazy_value_reinserts_then_expands_later() {
    let world = scenarios::lazy_distance().expect("valid graph");
    let options = ShortestAstarOptions {
        lazy: LazyEvaluatorKind::Distance,
        ..ShortestAstarOptions::default()
    };
    let config = shortest_astar(world.heuristic(EvaluatorOptions::default()), &options)
        .expect("valid config");
    let mut engine = ShortestEagerSearch::new(world.task(), config).expect("valid engine");

    let t1 = world.task().state("t1").expect("t1");
    let mut expanded_at_reinsertion = None;
    loop {
        let status = engine.step().expect("step");
        if status != SearchStatus::InProgress {
            assert_eq!(status, SearchStatus::Solved);
            break;
        }
        if engine.statistics().lazy_reinsertions == 1 && expanded_at_reinsertion.is_none() {
            expanded_at_reinsertion = Some(engine.statistics().expanded);
            let id = engine.search_space().lookup(&t1).expect("t1 registered");
            assert_eq!(engine.search_space().node(id).status, NodeStatus::Open);
        }
    }
    let id = engine.search_space().lookup(&t1).expect("t1 registered");
    assert_eq!(engine.search_space().node(id).status, NodeStatus::Closed);
    assert_eq!(expanded_at_reinsertion, Some(4));
    assert_eq!(engine.statistics().expanded, 5);
    assert_eq!(engine.plan().expect("plan").cost, 4);
}

#[test]
fn lazy_heuristic_with_stable_values_never_reinserts() {
    let config = SearchConfigV1::from_json_str(r#"{"lazy": "h"}"#).expect("valid JSON");
    let report = run_world_by_id(MAZE, &config).expect("search run failed");
    assert_eq!(report.statistics.lazy_reinsertions, 0);
    assert_eq!(report.plan.expect("plan").cost, 26);
}

// ---------------------------------------------------------------------------
// Construction-time rejection
// ---------------------------------------------------------------------------

#[test]
fn caching_disabled_fails_before_any_step() {
    let err = PathCostEvaluator::new(
        CostType::Normal,
        EvaluatorOptions {
            cache_estimates: false,
        },
    )
    .expect_err("must reject");
    assert!(matches!(err, ConfigError::CachingDisabled { .. }));

    let config = SearchConfigV1 {
        cache_estimates: false,
        ..SearchConfigV1::default()
    };
    let err = run_world_by_id(scenarios::DIAMOND, &config).expect_err("must reject");
    assert!(matches!(
        err,
        RunError::Config(ConfigError::CachingDisabled { .. })
    ));
}

#[test]
fn zero_expansion_budget_is_rejected() {
    let config = SearchConfigV1::from_json_str(r#"{"max_expansions": 0}"#).expect("valid JSON");
    let err = run_world_by_id(scenarios::DIAMOND, &config).expect_err("must reject");
    assert!(matches!(err, RunError::Config(ConfigError::InvalidLimit { .. })));
}

#[test]
fn expansion_budget_ends_the_run() {
    let config = SearchConfigV1::from_json_str(r#"{"max_expansions": 3}"#).expect("valid JSON");
    let report = run_world_by_id(MAZE, &config).expect("search run failed");
    assert_eq!(report.status, SearchStatus::BudgetExhausted);
    assert_eq!(report.statistics.expanded, 3);
    assert!(report.plan.is_none());
}

#[test]
fn open_grid_heuristic_guides_straight_to_goal() {
    let world = GridWorld::open("open_16", 16, 16).expect("valid grid");
    let h = world.heuristic(EvaluatorOptions::default());
    let config = shortest_astar(h, &ShortestAstarOptions::default()).expect("valid config");
    let mut engine = ShortestEagerSearch::new(&world, config).expect("valid engine");
    let outcome = engine.search().expect("search");
    let plan = outcome.plan.expect("plan");
    assert_eq!(plan.cost, 30);
    assert_eq!(plan.len(), 30);
    // Manhattan distance is consistent on an open grid.
    assert_eq!(outcome.statistics.reopened, 0);
    assert!(outcome.statistics.expanded <= 256);
}
