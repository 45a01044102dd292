//! `GraphTask`: an explicit weighted digraph as a planning task.
//!
//! States are named vertices, operators are named edges. An edge is
//! applicable exactly in its source vertex. Applicable operators are
//! reported in edge declaration order, which pins down the order in which
//! a search notifies transitions.
//!
//! An optional heuristic table attaches an estimate (or a dead-end mark) to
//! individual vertices; vertices without an entry estimate 0.

use std::collections::{BTreeSet, HashMap};

use super::{Cost, OperatorId, PlanningTask, TaskError};

/// A vertex of a [`GraphTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphState(u32);

impl GraphState {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct Edge {
    name: String,
    from: GraphState,
    to: GraphState,
    cost: Cost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableEntry {
    Value(Cost),
    DeadEnd,
}

/// Explicit graph task. Build with [`GraphTask::builder`].
#[derive(Debug, Clone)]
pub struct GraphTask {
    state_names: Vec<String>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<OperatorId>>,
    initial: GraphState,
    goals: BTreeSet<GraphState>,
    table: HashMap<GraphState, TableEntry>,
}

impl GraphTask {
    #[must_use]
    pub fn builder() -> GraphTaskBuilder {
        GraphTaskBuilder::default()
    }

    /// Look up a vertex by name.
    #[must_use]
    pub fn state(&self, name: &str) -> Option<GraphState> {
        self.state_names
            .iter()
            .position(|n| n == name)
            .and_then(|i| u32::try_from(i).ok())
            .map(GraphState)
    }

    #[must_use]
    pub fn state_name(&self, state: GraphState) -> &str {
        &self.state_names[state.index()]
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.state_names.len()
    }

    /// Operator by edge name.
    #[must_use]
    pub fn operator(&self, name: &str) -> Option<OperatorId> {
        self.edges
            .iter()
            .position(|e| e.name == name)
            .and_then(|i| u32::try_from(i).ok())
            .map(OperatorId::new)
    }

    /// Heuristic table lookup: `Some(h)` for an estimate (0 when the vertex
    /// has no entry), `None` when the vertex is marked as a dead end.
    #[must_use]
    pub fn table_estimate(&self, state: GraphState) -> Option<Cost> {
        match self.table.get(&state) {
            None => Some(0),
            Some(TableEntry::Value(h)) => Some(*h),
            Some(TableEntry::DeadEnd) => None,
        }
    }
}

impl PlanningTask for GraphTask {
    type State = GraphState;

    fn initial_state(&self) -> GraphState {
        self.initial
    }

    fn is_goal(&self, state: &GraphState) -> bool {
        self.goals.contains(state)
    }

    fn applicable_operators(&self, state: &GraphState) -> Vec<OperatorId> {
        self.outgoing[state.index()].clone()
    }

    fn apply(&self, state: &GraphState, op: OperatorId) -> GraphState {
        let edge = &self.edges[op.index()];
        debug_assert_eq!(
            edge.from, *state,
            "operator {} is not applicable in {}",
            edge.name,
            self.state_name(*state)
        );
        edge.to
    }

    fn operator_cost(&self, op: OperatorId) -> Cost {
        self.edges[op.index()].cost
    }

    fn operator_name(&self, op: OperatorId) -> &str {
        &self.edges[op.index()].name
    }

    fn operator_count(&self) -> usize {
        self.edges.len()
    }
}

/// Builder for [`GraphTask`]. Vertices are created on first mention.
#[derive(Debug, Default)]
pub struct GraphTaskBuilder {
    state_names: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<(String, usize, usize, Cost)>,
    initial: Option<String>,
    goals: Vec<String>,
    table: Vec<(String, TableEntry)>,
}

impl GraphTaskBuilder {
    fn intern(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.state_names.len();
        self.state_names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        i
    }

    /// Declare a vertex without edges.
    #[must_use]
    pub fn state(mut self, name: &str) -> Self {
        self.intern(name);
        self
    }

    /// Declare an operator `name` leading from `from` to `to`.
    #[must_use]
    pub fn edge(mut self, name: &str, from: &str, to: &str, cost: Cost) -> Self {
        let f = self.intern(from);
        let t = self.intern(to);
        self.edges.push((name.to_string(), f, t, cost));
        self
    }

    #[must_use]
    pub fn initial(mut self, name: &str) -> Self {
        self.initial = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn goal(mut self, name: &str) -> Self {
        self.goals.push(name.to_string());
        self
    }

    /// Attach a heuristic estimate to an already declared vertex.
    #[must_use]
    pub fn estimate(mut self, name: &str, h: Cost) -> Self {
        self.table.push((name.to_string(), TableEntry::Value(h)));
        self
    }

    /// Mark an already declared vertex as a heuristic dead end.
    #[must_use]
    pub fn dead_end(mut self, name: &str) -> Self {
        self.table.push((name.to_string(), TableEntry::DeadEnd));
        self
    }

    /// Validate and build the task.
    ///
    /// # Errors
    ///
    /// - [`TaskError::MissingInitialState`] if no initial state was declared.
    /// - [`TaskError::UnknownState`] if the initial state, a goal or a table
    ///   entry names a vertex that was never declared.
    /// - [`TaskError::NegativeCost`] for an edge with negative cost.
    /// - [`TaskError::TooLarge`] if vertices or edges overflow `u32`.
    pub fn build(self) -> Result<GraphTask, TaskError> {
        let lookup = |name: &str| -> Result<GraphState, TaskError> {
            let i = self
                .index
                .get(name)
                .copied()
                .ok_or_else(|| TaskError::UnknownState {
                    name: name.to_string(),
                })?;
            to_u32(i, "states").map(GraphState)
        };

        let initial_name = self
            .initial
            .as_deref()
            .ok_or(TaskError::MissingInitialState)?;
        let initial = lookup(initial_name)?;

        let goals = self
            .goals
            .iter()
            .map(|g| lookup(g))
            .collect::<Result<BTreeSet<_>, _>>()?;

        let mut table = HashMap::new();
        for (name, entry) in &self.table {
            table.insert(lookup(name)?, *entry);
        }

        let mut outgoing = vec![Vec::new(); self.state_names.len()];
        let mut edges = Vec::with_capacity(self.edges.len());
        for (i, (name, from, to, cost)) in self.edges.iter().enumerate() {
            if *cost < 0 {
                return Err(TaskError::NegativeCost {
                    operator: name.clone(),
                    cost: *cost,
                });
            }
            outgoing[*from].push(OperatorId::new(to_u32(i, "operators")?));
            edges.push(Edge {
                name: name.clone(),
                from: GraphState(to_u32(*from, "states")?),
                to: GraphState(to_u32(*to, "states")?),
                cost: *cost,
            });
        }

        Ok(GraphTask {
            state_names: self.state_names,
            edges,
            outgoing,
            initial,
            goals,
            table,
        })
    }
}

fn to_u32(i: usize, what: &'static str) -> Result<u32, TaskError> {
    u32::try_from(i).map_err(|_| TaskError::TooLarge { what })
}
