//! Per-evaluator estimate cache.
//!
//! Each cached value carries an explicit freshness state. A value that
//! needs recomputation keeps its previous estimate so callers can compare
//! old and new values; a state never written is `Absent`.

use std::collections::HashMap;

use crate::evaluator::Estimate;
use crate::search_space::StateId;

/// Observed state of one cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEntry {
    Fresh(Estimate),
    NeedsRecompute(Estimate),
    Absent,
}

/// Construction options shared by cached evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Keep estimates across evaluation contexts.
    pub cache_estimates: bool,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            cache_estimates: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    estimate: Estimate,
    dirty: bool,
}

/// State → estimate cache owned by exactly one evaluator.
#[derive(Debug, Default)]
pub struct EstimateCache {
    slots: HashMap<StateId, Slot>,
}

impl EstimateCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lookup(&self, state: StateId) -> CacheEntry {
        match self.slots.get(&state) {
            None => CacheEntry::Absent,
            Some(slot) if slot.dirty => CacheEntry::NeedsRecompute(slot.estimate),
            Some(slot) => CacheEntry::Fresh(slot.estimate),
        }
    }

    /// Unconditionally store a fresh estimate.
    pub fn store(&mut self, state: StateId, estimate: Estimate) {
        self.slots.insert(
            state,
            Slot {
                estimate,
                dirty: false,
            },
        );
    }

    /// Store `candidate` if the slot is absent or holds a strictly larger
    /// value. An absent slot counts as +infinity. Returns whether a write
    /// happened.
    pub fn write_if_better(&mut self, state: StateId, candidate: i64) -> bool {
        let candidate = Estimate::Finite(candidate);
        let improves = match self.slots.get(&state) {
            None => true,
            Some(slot) => candidate < slot.estimate,
        };
        if improves {
            self.store(state, candidate);
        }
        improves
    }

    /// Mark a cached value as needing recomputation. Returns `false` if the
    /// state has no cached value.
    pub fn invalidate(&mut self, state: StateId) -> bool {
        match self.slots.get_mut(&state) {
            Some(slot) => {
                slot.dirty = true;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
