//! State registry and per-state search node table.
//!
//! States are interned to dense [`StateId`]s on first discovery. Each id has
//! exactly one [`SearchNodeInfo`] for the lifetime of the run. Predecessor
//! links are stored as a flat `state → (predecessor, operator)` table and
//! are never owning; a path is recovered by repeated lookup.

use std::collections::HashMap;
use std::hash::Hash;

use waymark_kernel::task::{Cost, OperatorId};

use crate::error::SearchError;

/// Dense identifier of a registered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interning table: state value ↔ `StateId`.
#[derive(Debug)]
pub struct StateRegistry<S> {
    ids: HashMap<S, StateId>,
    states: Vec<S>,
}

impl<S: Clone + Eq + Hash> StateRegistry<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            states: Vec::new(),
        }
    }

    /// Register `state` if unseen. Returns its id and whether it is new.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::StateSpaceOverflow`] when ids are exhausted.
    pub fn insert(&mut self, state: S) -> Result<(StateId, bool), SearchError> {
        if let Some(&id) = self.ids.get(&state) {
            return Ok((id, false));
        }
        let index = u32::try_from(self.states.len()).map_err(|_| {
            SearchError::StateSpaceOverflow {
                count: self.states.len(),
            }
        })?;
        let id = StateId(index);
        self.ids.insert(state.clone(), id);
        self.states.push(state);
        Ok((id, true))
    }

    #[must_use]
    pub fn lookup(&self, state: &S) -> Option<StateId> {
        self.ids.get(state).copied()
    }

    #[must_use]
    pub fn state(&self, id: StateId) -> &S {
        &self.states[id.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<S: Clone + Eq + Hash> Default for StateRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of a search node.
///
/// `New → Open → Closed`, with `Closed → Open` on strict g improvement.
/// `DeadEnd` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    New,
    Open,
    Closed,
    DeadEnd,
}

impl NodeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::DeadEnd => "dead_end",
        }
    }
}

/// Per-state metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNodeInfo {
    pub status: NodeStatus,
    /// Best known path cost under the engine's cost type.
    pub g: Cost,
    /// Path cost of the same path under true operator costs.
    pub real_g: Cost,
    /// Predecessor and causing operator (`None` for the start state).
    pub parent: Option<(StateId, OperatorId)>,
}

impl SearchNodeInfo {
    const UNREACHED: Self = Self {
        status: NodeStatus::New,
        g: Cost::MAX,
        real_g: Cost::MAX,
        parent: None,
    };
}

/// One line of a search space dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSpaceEntry {
    pub state: StateId,
    pub status: NodeStatus,
    pub g: Cost,
    pub real_g: Cost,
    pub parent: Option<(StateId, OperatorId)>,
}

/// Registry plus node table, exclusively owned by one engine.
#[derive(Debug)]
pub struct SearchSpace<S> {
    registry: StateRegistry<S>,
    nodes: Vec<SearchNodeInfo>,
}

impl<S: Clone + Eq + Hash> SearchSpace<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: StateRegistry::new(),
            nodes: Vec::new(),
        }
    }

    /// Register a state, creating a `New` node on first discovery.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::StateSpaceOverflow`] when ids are exhausted.
    pub fn register(&mut self, state: S) -> Result<StateId, SearchError> {
        let (id, is_new) = self.registry.insert(state)?;
        if is_new {
            self.nodes.push(SearchNodeInfo::UNREACHED);
        }
        Ok(id)
    }

    #[must_use]
    pub fn lookup(&self, state: &S) -> Option<StateId> {
        self.registry.lookup(state)
    }

    #[must_use]
    pub fn state(&self, id: StateId) -> &S {
        self.registry.state(id)
    }

    #[must_use]
    pub fn node(&self, id: StateId) -> SearchNodeInfo {
        self.nodes[id.index()]
    }

    /// Number of registered states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Open the start state with g = 0 and no predecessor.
    pub fn open_initial(&mut self, id: StateId) {
        self.nodes[id.index()] = SearchNodeInfo {
            status: NodeStatus::Open,
            g: 0,
            real_g: 0,
            parent: None,
        };
    }

    /// Record a (better) path to `id` through `parent` and set it `Open`.
    ///
    /// Used for first discovery, for improving an open node, and for
    /// reopening a closed one.
    pub fn open_via(
        &mut self,
        id: StateId,
        parent: StateId,
        operator: OperatorId,
        g: Cost,
        real_g: Cost,
    ) {
        self.nodes[id.index()] = SearchNodeInfo {
            status: NodeStatus::Open,
            g,
            real_g,
            parent: Some((parent, operator)),
        };
    }

    /// Mark a popped node as expanded.
    pub fn close(&mut self, id: StateId) {
        self.nodes[id.index()].status = NodeStatus::Closed;
    }

    pub fn mark_dead_end(&mut self, id: StateId) {
        self.nodes[id.index()].status = NodeStatus::DeadEnd;
    }

    /// Operators on the recorded path from the start state to `goal`.
    ///
    /// Terminates because g strictly decreases along predecessor links.
    #[must_use]
    pub fn trace_path(&self, goal: StateId) -> Vec<OperatorId> {
        let mut ops = Vec::new();
        let mut current = goal;
        while let Some((parent, op)) = self.nodes[current.index()].parent {
            ops.push(op);
            current = parent;
        }
        ops.reverse();
        ops
    }

    /// Every registered state in id order.
    #[must_use]
    pub fn dump(&self) -> Vec<SearchSpaceEntry> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| {
                let index = u32::try_from(i).ok()?;
                Some(SearchSpaceEntry {
                    state: StateId(index),
                    status: n.status,
                    g: n.g,
                    real_g: n.real_g,
                    parent: n.parent,
                })
            })
            .collect()
    }
}

impl<S: Clone + Eq + Hash> Default for SearchSpace<S> {
    fn default() -> Self {
        Self::new()
    }
}
