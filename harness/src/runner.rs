//! Harness runner: executes one search and packages the result as a
//! canonical, content-hashed report.
//!
//! # Pipeline
//!
//! ```text
//! config.validate() → world.heuristic() → shortest_astar()
//!   → ShortestEagerSearch::search() → dump_search_space()
//!   → report JSON → canonical_json_bytes() → canonical_hash()
//! ```
//!
//! The report carries only integer counters and names, never timings, so
//! identical inputs produce byte-identical reports.

use std::path::Path;

use serde_json::{json, Value};
use thiserror::Error;
use waymark_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waymark_kernel::proof::hash::{
    canonical_hash, ContentHash, DOMAIN_PLAN, DOMAIN_SEARCH_CONFIG, DOMAIN_SEARCH_REPORT,
};
use waymark_kernel::task::{PlanningTask, TaskError};
use waymark_search::astar::shortest_astar;
use waymark_search::engine::{SearchStatus, ShortestEagerSearch};
use waymark_search::error::{ConfigError, SearchError};
use waymark_search::plan::Plan;
use waymark_search::search_space::SearchSpaceEntry;
use waymark_search::statistics::SearchStatistics;

use crate::config::SearchConfigV1;
use crate::worlds::grid::{GridError, GridWorld};
use crate::worlds::scenarios::GraphWorld;
use crate::worlds::SearchWorld;

pub const REPORT_SCHEMA_VERSION: &str = "search_report.v1";

/// Error during a harness run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("unknown world {world_id}")]
    UnknownWorld { world_id: String },
    #[error("invalid graph world: {0}")]
    Task(#[from] TaskError),
    #[error("invalid grid world: {0}")]
    Grid(#[from] GridError),
    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),
    #[error("search aborted: {0}")]
    Search(#[from] SearchError),
    #[error("canonical JSON failed: {0}")]
    Canon(#[from] CanonError),
    #[error("i/o error: {detail}")]
    Io { detail: String },
    /// Persisted report bytes do not hash to the expected digest.
    #[error("report digest mismatch: expected {expected}, found {found}")]
    DigestMismatch { expected: String, found: String },
}

/// The externally visible result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReportV1 {
    pub world_id: String,
    pub config: SearchConfigV1,
    pub status: SearchStatus,
    pub plan: Option<Plan>,
    pub statistics: SearchStatistics,
    pub search_space: Vec<SearchSpaceEntry>,
    /// `canonical_hash(DOMAIN_SEARCH_CONFIG, canonical config bytes)`.
    pub config_digest: ContentHash,
    /// `canonical_hash(DOMAIN_PLAN, canonical plan bytes)` when solved.
    pub plan_digest: Option<ContentHash>,
    /// Canonical JSON of the whole report.
    pub canonical_bytes: Vec<u8>,
    /// `canonical_hash(DOMAIN_SEARCH_REPORT, canonical_bytes)`.
    pub digest: ContentHash,
}

/// Run the A* variant on `world` under `config` and build its report.
///
/// # Errors
///
/// - [`RunError::Config`] if `config` is rejected (zero budget, caching
///   disabled). No search step runs in this case.
/// - [`RunError::Search`] if the run hit an internal invariant violation.
/// - [`RunError::Canon`] if the report cannot be canonicalized.
pub fn run_search<W>(world: &W, config: &SearchConfigV1) -> Result<SearchReportV1, RunError>
where
    W: SearchWorld,
    <W::Task as PlanningTask>::State: 'static,
{
    config.validate()?;
    let options = config.to_options();
    let heuristic = world.heuristic(options.evaluator_options);
    let astar = shortest_astar(heuristic, &options)?;
    let mut engine = ShortestEagerSearch::new(world.task(), astar)?;

    let outcome = engine.search()?;
    let search_space = engine.dump_search_space();

    let config_bytes = canonical_json_bytes(&config.to_json_value())?;
    let config_digest = canonical_hash(DOMAIN_SEARCH_CONFIG, &config_bytes);
    let plan_digest = match &outcome.plan {
        Some(plan) => Some(canonical_hash(
            DOMAIN_PLAN,
            &canonical_json_bytes(&plan.to_json_value())?,
        )),
        None => None,
    };

    let report_json = json!({
        "schema_version": REPORT_SCHEMA_VERSION,
        "world_id": world.world_id(),
        "config": config.to_json_value(),
        "config_digest": config_digest.as_str(),
        "status": outcome.status.as_str(),
        "plan": outcome.plan.as_ref().map_or(Value::Null, Plan::to_json_value),
        "plan_digest": plan_digest.as_ref().map(ContentHash::as_str),
        "statistics": outcome.statistics.to_json_value(),
        "search_space": search_space_json(world.task(), &search_space),
    });
    let canonical_bytes = canonical_json_bytes(&report_json)?;
    let digest = canonical_hash(DOMAIN_SEARCH_REPORT, &canonical_bytes);

    tracing::info!(
        world_id = world.world_id(),
        status = outcome.status.as_str(),
        digest = digest.as_str(),
        "search report built"
    );

    Ok(SearchReportV1 {
        world_id: world.world_id().to_string(),
        config: *config,
        status: outcome.status,
        plan: outcome.plan,
        statistics: outcome.statistics,
        search_space,
        config_digest,
        plan_digest,
        canonical_bytes,
        digest,
    })
}

/// Resolve `world_id` among the built-in scenario and grid worlds and run
/// it.
///
/// # Errors
///
/// [`RunError::UnknownWorld`] for an unknown id, otherwise as
/// [`run_search`].
pub fn run_world_by_id(world_id: &str, config: &SearchConfigV1) -> Result<SearchReportV1, RunError> {
    if let Some(world) = GraphWorld::by_id(world_id)? {
        return run_search(&world, config);
    }
    if let Some(world) = GridWorld::by_id(world_id)? {
        return run_search(&world, config);
    }
    Err(RunError::UnknownWorld {
        world_id: world_id.to_string(),
    })
}

fn search_space_json<T: PlanningTask>(task: &T, entries: &[SearchSpaceEntry]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|e| {
                json!({
                    "state": e.state.index(),
                    "status": e.status.as_str(),
                    "g": e.g,
                    "real_g": e.real_g,
                    "parent": e.parent.map(|(p, _)| p.index()),
                    "operator": e.parent.map(|(_, op)| task.operator_name(op)),
                })
            })
            .collect(),
    )
}

/// Write the report's canonical bytes to `path` (temp file, then rename).
///
/// # Errors
///
/// Returns [`RunError::Io`] on any filesystem failure.
pub fn write_report(report: &SearchReportV1, path: &Path) -> Result<(), RunError> {
    let dir = path.parent().ok_or_else(|| RunError::Io {
        detail: format!("{} has no parent directory", path.display()),
    })?;
    let temp_path = dir.join(format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));
    std::fs::write(&temp_path, &report.canonical_bytes).map_err(|e| RunError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| RunError::Io {
        detail: format!("rename {} to {}: {e}", temp_path.display(), path.display()),
    })
}

/// Read persisted report bytes and check them against `expected`.
///
/// # Errors
///
/// - [`RunError::Io`] if the file cannot be read.
/// - [`RunError::DigestMismatch`] if the bytes hash differently.
pub fn read_verified_report(path: &Path, expected: &ContentHash) -> Result<Vec<u8>, RunError> {
    let bytes = std::fs::read(path).map_err(|e| RunError::Io {
        detail: format!("read {}: {e}", path.display()),
    })?;
    let found = canonical_hash(DOMAIN_SEARCH_REPORT, &bytes);
    if &found != expected {
        return Err(RunError::DigestMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }
    Ok(bytes)
}
