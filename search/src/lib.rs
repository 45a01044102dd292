//! Waymark Search: shortest-path eager search with path-dependent evaluators.
//!
//! This crate provides the search core. It depends only on `waymark_kernel`
//! (for the `PlanningTask` boundary); it does NOT depend on `waymark_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! waymark_kernel  ←  waymark_search  ←  waymark_harness
//! (task model)       (evaluators,       (worlds, config,
//!                     open list, engine)  reports)
//! ```
//!
//! # Key types
//!
//! - [`evaluator::Evaluator`] -- estimate capability, evaluated through an
//!   [`context::EvaluationContext`]
//! - [`evaluators::PathCostEvaluator`] -- best-known path cost per state,
//!   maintained from transition notifications
//! - [`evaluators::TieBreakingEvaluator`] -- ordered key vector with dead-end
//!   short-circuit
//! - [`open_list::TieBreakingOpenList`] -- lexicographic key order, FIFO ties
//! - [`engine::ShortestEagerSearch`] -- the eager loop with reopening and lazy
//!   re-evaluation; [`astar::shortest_astar`] wires the fixed A* variant

#![forbid(unsafe_code)]

pub mod astar;
pub mod cache;
pub mod context;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod evaluators;
pub mod open_list;
pub mod plan;
pub mod policy;
pub mod pruning;
pub mod search_space;
pub mod statistics;
