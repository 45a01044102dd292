//! Typed search errors.
//!
//! `ConfigError` represents construction-time failures: no engine (and no
//! evaluator) is produced. `SearchError` represents internal invariant
//! violations that end a run. Exhausting the search space is not an error;
//! it is the `Failed` outcome of [`crate::engine::SearchStatus`].

use thiserror::Error;

use crate::search_space::StateId;

/// Construction-time configuration failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An evaluator whose function depends on a persistent estimate cache was
    /// configured with caching disabled.
    #[error("estimate caching must not be disabled for {evaluator}")]
    CachingDisabled { evaluator: String },

    /// This engine variant does not use preferred operators.
    #[error("preferred operator evaluators are not supported by shortest eager search")]
    PreferredOperatorsUnsupported,

    /// This engine variant always reopens closed nodes on a strictly
    /// cheaper path.
    #[error("shortest eager search requires reopening of closed nodes")]
    ReopeningDisabled,

    /// A search limit is present but can never allow a single step.
    #[error("invalid search limit: {detail}")]
    InvalidLimit { detail: String },
}

/// Internal invariant violation that terminates a run.
///
/// These signal an ordering bug in the caller (or in the engine), never a
/// normal runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A path-dependent evaluator was queried for a state it was never
    /// notified about.
    #[error("{evaluator} queried for state {state} before any notification reached it")]
    UnnotifiedState { evaluator: String, state: StateId },

    /// A transition was notified whose parent has no cached value.
    #[error("{evaluator} notified of a transition from uncached parent {state}")]
    UncachedParent { evaluator: String, state: StateId },

    /// More distinct states were reached than `StateId` can address.
    #[error("state registry overflow after {count} states")]
    StateSpaceOverflow { count: usize },

    /// `initialize` was called on an engine that already ran.
    #[error("search engine was already initialized")]
    AlreadyInitialized,

    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
