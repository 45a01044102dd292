//! Waymark Harness: worlds, run configuration and search reports.
//!
//! The harness runs a world through the search core
//! (`shortest_astar` → `ShortestEagerSearch::search`) and packages the
//! result as a canonical JSON report bound to a content hash.
//!
//! The harness does NOT implement search logic; it delegates to
//! `waymark_search`. Worlds provide the task and heuristic only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod runner;
pub mod worlds;
