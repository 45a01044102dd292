//! Tie-breaking open list.
//!
//! Entries are ordered lexicographically ascending by their key vector, then
//! by insertion sequence (FIFO among equal keys).
//!
//! The list never updates entries in place. When a node's key changes it is
//! inserted again, and the superseded entry is recognized as stale by the
//! engine when it surfaces.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use waymark_kernel::task::Cost;

use crate::evaluator::Estimate;
use crate::search_space::StateId;

/// The ordering key: evaluator values, then insertion sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OpenKey {
    pub values: Vec<i64>,
    pub sequence: u64,
}

/// An extracted open-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEntry {
    pub state: StateId,
    pub key: OpenKey,
    /// The node's g when this entry was inserted.
    pub g: Cost,
    /// The lazy evaluator's value when this entry was inserted.
    pub lazy: Option<Estimate>,
}

/// `BinaryHeap` is a max-heap, so we store `Reverse<OpenKey>` to pop the
/// smallest key first.
#[derive(Debug)]
struct HeapEntry {
    key: Reverse<OpenKey>,
    entry: OpenEntry,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

#[derive(Debug, Default)]
pub struct TieBreakingOpenList {
    heap: BinaryHeap<HeapEntry>,
    next_sequence: u64,
}

impl TieBreakingOpenList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `state` under `values`. Sequence numbers are unique, so the
    /// resulting key is unique too.
    pub fn insert(&mut self, state: StateId, values: Vec<i64>, g: Cost, lazy: Option<Estimate>) {
        let key = OpenKey {
            values,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.heap.push(HeapEntry {
            key: Reverse(key.clone()),
            entry: OpenEntry {
                state,
                key,
                g,
                lazy,
            },
        });
    }

    /// Remove and return the minimum entry.
    #[must_use]
    pub fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop().map(|e| e.entry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
