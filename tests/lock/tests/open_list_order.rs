//! Open-list extraction order and the `[f, d, h]` key built by the A*
//! configuration.

use std::rc::Rc;

use waymark_kernel::task::OperatorId;
use waymark_search::astar::{shortest_astar, ShortestAstarOptions};
use waymark_search::cache::EvaluatorOptions;
use waymark_search::context::EvaluationContext;
use waymark_search::evaluator::{Estimate, Evaluator, Transition};
use waymark_search::evaluators::FnHeuristic;
use waymark_search::open_list::TieBreakingOpenList;
use waymark_search::search_space::StateId;

fn s(i: u32) -> StateId {
    StateId::new(i)
}

#[test]
fn extraction_is_lexicographic_then_fifo() {
    let mut open = TieBreakingOpenList::new();
    // (state, [f, d, h])
    let inserts: [(u32, [i64; 3]); 7] = [
        (0, [7, 2, 3]),
        (1, [5, 3, 1]),
        (2, [5, 2, 4]),
        (3, [5, 2, 4]),
        (4, [5, 2, 2]),
        (5, [6, 0, 6]),
        (6, [5, 3, 1]),
    ];
    for (state, key) in inserts {
        open.insert(s(state), key.to_vec(), 0, None);
    }

    let order: Vec<u32> = std::iter::from_fn(|| open.pop())
        .map(|e| u32::try_from(e.state.index()).expect("small id"))
        .collect();
    assert_eq!(order, vec![4, 2, 3, 1, 6, 5, 0]);
}

#[test]
fn reinserted_state_surfaces_under_each_key() {
    let mut open = TieBreakingOpenList::new();
    open.insert(s(0), vec![4, 1, 3], 1, None);
    open.insert(s(1), vec![3, 2, 1], 2, None);
    open.insert(s(0), vec![3, 1, 2], 1, None);

    let first = open.pop().expect("entry");
    assert_eq!((first.state, first.key.values.clone()), (s(0), vec![3, 1, 2]));
    assert_eq!(open.pop().expect("entry").state, s(1));
    let stale = open.pop().expect("entry");
    assert_eq!((stale.state, stale.key.values), (s(0), vec![4, 1, 3]));
    assert!(open.pop().is_none());
    assert!(open.is_empty());
}

#[test]
fn astar_key_is_f_then_steps_then_h() {
    let h: Rc<dyn Evaluator<u32>> = Rc::new(FnHeuristic::new(
        "table",
        EvaluatorOptions::default(),
        |state: &u32| match state {
            9 => Estimate::DeadEnd,
            other => Estimate::Finite(i64::from(*other)),
        },
    ));
    let config = shortest_astar(h, &ShortestAstarOptions::default()).expect("valid config");
    let key = &config.open_evaluator;

    // 0 --(3)--> 1 --(2)--> 2
    key.notify_initial_state(s(0)).expect("initial");
    key.notify_state_transition(&Transition {
        parent: s(0),
        operator: OperatorId::new(0),
        cost: 3,
        child: s(1),
    })
    .expect("transition");
    key.notify_state_transition(&Transition {
        parent: s(1),
        operator: OperatorId::new(1),
        cost: 2,
        child: s(2),
    })
    .expect("transition");

    let state = 2u32;
    let mut ctx = EvaluationContext::new(s(2), &state, 5);
    assert_eq!(key.evaluate_key(&mut ctx).expect("key"), Some(vec![7, 2, 2]));

    let dead = 9u32;
    key.notify_state_transition(&Transition {
        parent: s(2),
        operator: OperatorId::new(2),
        cost: 1,
        child: s(9),
    })
    .expect("transition");
    let mut ctx = EvaluationContext::new(s(9), &dead, 6);
    assert_eq!(key.evaluate_key(&mut ctx).expect("key"), None);
}
