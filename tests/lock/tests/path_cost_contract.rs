//! Path-cost evaluator contract: monotone writes, exact values under
//! cost-ordered notification, and the stale-descendant limitation.

use std::collections::BTreeMap;

use waymark_harness::worlds::scenarios;
use waymark_harness::worlds::SearchWorld;
use waymark_kernel::task::graph::{GraphState, GraphTask};
use waymark_kernel::task::{Cost, PlanningTask};
use waymark_search::cache::EvaluatorOptions;
use waymark_search::error::SearchError;
use waymark_search::evaluator::{CostType, Transition};
use waymark_search::evaluators::PathCostEvaluator;
use waymark_search::search_space::StateId;

fn sid(state: GraphState) -> StateId {
    StateId::new(u32::try_from(state.index()).expect("small graph"))
}

fn transition(task: &GraphTask, from: &str, op: &str) -> Transition {
    let parent = task.state(from).expect("state");
    let operator = task.operator(op).expect("operator");
    Transition {
        parent: sid(parent),
        operator,
        cost: task.operator_cost(operator),
        child: sid(task.apply(&parent, operator)),
    }
}

fn evaluator() -> PathCostEvaluator {
    PathCostEvaluator::new(CostType::Normal, EvaluatorOptions::default()).expect("caching on")
}

/// Layered graph with several crossing paths of different cost.
fn layered() -> GraphTask {
    GraphTask::builder()
        .edge("e0", "n0", "n1", 4)
        .edge("e1", "n0", "n2", 1)
        .edge("e2", "n2", "n1", 2)
        .edge("e3", "n1", "n3", 5)
        .edge("e4", "n2", "n3", 8)
        .edge("e5", "n2", "n4", 10)
        .edge("e6", "n3", "n4", 2)
        .edge("e7", "n1", "n4", 9)
        .edge("e8", "n4", "n5", 0)
        .edge("e9", "n3", "n5", 6)
        .initial("n0")
        .goal("n5")
        .build()
        .expect("valid graph")
}

/// True shortest-path costs from the initial state (Bellman-Ford).
fn true_costs(task: &GraphTask) -> BTreeMap<GraphState, Cost> {
    let names: Vec<String> = (0..task.state_count()).map(|i| format!("n{i}")).collect();
    let states: Vec<GraphState> = names.iter().filter_map(|n| task.state(n)).collect();
    let mut dist = BTreeMap::new();
    dist.insert(task.initial_state(), 0);
    for _ in 0..states.len() {
        for &s in &states {
            let Some(&d) = dist.get(&s) else { continue };
            for op in task.applicable_operators(&s) {
                let child = task.apply(&s, op);
                let candidate = d + task.operator_cost(op);
                if dist.get(&child).map_or(true, |&old| candidate < old) {
                    dist.insert(child, candidate);
                }
            }
        }
    }
    dist
}

#[test]
fn every_write_strictly_decreases_the_value() {
    let task = layered();
    let g = evaluator();
    g.initialize(sid(task.initial_state()));
    let order = [
        ("n0", "e0"),
        ("n1", "e3"),
        ("n1", "e7"),
        ("n0", "e1"),
        ("n2", "e2"),
        ("n2", "e4"),
        ("n2", "e5"),
        ("n1", "e3"),
        ("n3", "e6"),
        ("n4", "e8"),
        ("n3", "e9"),
    ];
    for (from, op) in order {
        let t = transition(&task, from, op);
        let before = g.get(t.child).ok();
        let wrote = g.on_transition(&t).expect("parent cached");
        let after = g.get(t.child).expect("child cached");
        match before {
            Some(old) if wrote => assert!(after < old, "{op}: {after} !< {old}"),
            Some(old) => assert_eq!(after, old, "{op}: no-op changed the value"),
            None => assert!(wrote, "{op}: first notification must write"),
        }
    }
}

#[test]
fn cost_ordered_notification_yields_true_costs() {
    let task = layered();
    let dist = true_costs(&task);
    let g = evaluator();
    g.initialize(sid(task.initial_state()));

    // Notify every outgoing edge of each state, in non-decreasing order of
    // the parent's true cost (as a Dijkstra expansion would).
    let mut order: Vec<(Cost, GraphState)> = dist.iter().map(|(&s, &d)| (d, s)).collect();
    order.sort();
    for (_, parent) in order {
        for op in task.applicable_operators(&parent) {
            let child = task.apply(&parent, op);
            g.on_transition(&Transition {
                parent: sid(parent),
                operator: op,
                cost: task.operator_cost(op),
                child: sid(child),
            })
            .expect("parent cached");
        }
    }

    for (state, expected) in &dist {
        assert_eq!(
            g.get(sid(*state)).expect("reached"),
            *expected,
            "state {}",
            task.state_name(*state)
        );
    }
}

#[test]
fn later_cheaper_ancestor_path_is_not_propagated() {
    let world = scenarios::stale_descendant().expect("valid graph");
    let task = world.task();
    let g = evaluator();
    g.initialize(sid(task.initial_state()));

    // a→c (5), then c→d, and only afterwards a→b→c (1 + 1).
    g.on_transition(&transition(task, "a", "a_c")).expect("a cached");
    g.on_transition(&transition(task, "c", "c_d")).expect("c cached");
    g.on_transition(&transition(task, "a", "a_b")).expect("a cached");
    g.on_transition(&transition(task, "b", "b_c")).expect("b cached");

    let c = sid(task.state("c").expect("c"));
    let d = sid(task.state("d").expect("d"));
    assert_eq!(g.get(c).expect("c cached"), 2);
    assert_eq!(g.get(d).expect("d cached"), 6, "d keeps the stale value");
}

#[test]
fn unnotified_query_is_an_error() {
    let task = layered();
    let g = evaluator();
    g.initialize(sid(task.initial_state()));
    let n5 = sid(task.state("n5").expect("n5"));
    assert!(matches!(
        g.get(n5),
        Err(SearchError::UnnotifiedState { state, .. }) if state == n5
    ));
}

#[test]
fn transition_from_uncached_parent_is_an_error() {
    let task = layered();
    let g = evaluator();
    g.initialize(sid(task.initial_state()));
    let t = transition(&task, "n3", "e6");
    assert!(matches!(
        g.on_transition(&t),
        Err(SearchError::UncachedParent { .. })
    ));
}
