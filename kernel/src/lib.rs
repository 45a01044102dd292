//! Waymark Kernel: the task model consumed by the search core.
//!
//! # API Surface
//!
//! - [`task::PlanningTask`] -- the collaborator the search engine drives
//!   (initial state, goal test, operator application and costs)
//! - [`task::graph::GraphTask`] -- an explicit weighted digraph implementing
//!   `PlanningTask`, used by worlds, tests and benchmarks
//! - [`proof::canon::canonical_json_bytes`] and [`proof::hash::canonical_hash`]
//!   -- the single serialization and hashing path for search artifacts
//!
//! # Module Dependency Direction
//!
//! `task` ← `proof`
//!
//! `task` depends on nothing internal. `proof` only serializes values
//! produced elsewhere.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
pub mod task;
