//! Shortest-path eager search.
//!
//! Best-first search over a [`PlanningTask`] with closed-node reopening and
//! optional lazy re-evaluation at extraction time. One call to
//! [`ShortestEagerSearch::step`] performs one loop iteration:
//!
//! 1. Stop with `BudgetExhausted` if a [`SearchLimits`] bound is reached.
//! 2. Stop with `Failed` if the open list is empty.
//! 3. Pop the minimum entry. Discard it if the node was closed (or found
//!    dead) since, or if a cheaper path superseded the entry.
//! 4. With a lazy evaluator, recompute its value in a fresh context. A dead
//!    end drops the node; a changed value reinserts it under a recomputed
//!    key without expanding it.
//! 5. Stop with `Solved` if the node is a goal.
//! 6. Close and expand: for every unpruned operator, notify path-dependent
//!    evaluators of the transition, then (re)insert the successor if it is
//!    new or its g strictly improved, reopening it if it was closed.
//!
//! Successor keys are only computed when the successor is (re)inserted; a
//! successor whose g does not improve keeps its existing entry, so its key
//! would be unused.

use std::rc::Rc;
use std::time::{Duration, Instant};

use waymark_kernel::task::{Cost, OperatorId, PlanningTask};

use crate::astar::ShortestAstarConfig;
use crate::context::EvaluationContext;
use crate::error::{ConfigError, SearchError};
use crate::evaluator::{CostType, Estimate, Evaluator, EvaluatorId, Transition};
use crate::evaluators::TieBreakingEvaluator;
use crate::open_list::TieBreakingOpenList;
use crate::plan::Plan;
use crate::policy::SearchLimits;
use crate::pruning::{NullPruning, PruningMethod};
use crate::search_space::{NodeStatus, SearchNodeInfo, SearchSpace, SearchSpaceEntry, StateId};
use crate::statistics::SearchStatistics;

/// Result of one [`ShortestEagerSearch::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    InProgress,
    Solved,
    Failed,
    BudgetExhausted,
}

impl SearchStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Solved => "solved",
            Self::Failed => "failed",
            Self::BudgetExhausted => "budget_exhausted",
        }
    }
}

/// Terminal result of [`ShortestEagerSearch::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    /// Present exactly when `status` is `Solved`.
    pub plan: Option<Plan>,
    pub statistics: SearchStatistics,
}

impl SearchOutcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }
}

/// Key vector and lazy value of an evaluated state.
type Evaluation = (Vec<i64>, Option<Estimate>);

pub struct ShortestEagerSearch<'t, T: PlanningTask> {
    task: &'t T,
    open_evaluator: Rc<TieBreakingEvaluator<T::State>>,
    lazy_evaluator: Option<Rc<dyn Evaluator<T::State>>>,
    /// Whether the lazy evaluator needs its own notifications (it is
    /// path-dependent and not already reached through the open evaluator).
    notify_lazy: bool,
    cost_type: CostType,
    limits: SearchLimits,
    pruning: Box<dyn PruningMethod<T::State>>,
    space: SearchSpace<T::State>,
    open: TieBreakingOpenList,
    statistics: SearchStatistics,
    started: Option<Instant>,
    finished: Option<SearchStatus>,
    /// First contract violation; once set the run never advances again.
    aborted: Option<SearchError>,
    solution: Option<StateId>,
}

impl<'t, T: PlanningTask> ShortestEagerSearch<'t, T> {
    /// Validate `config` and create an engine for `task`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::PreferredOperatorsUnsupported`] if preferred
    ///   operator evaluators are configured.
    /// - [`ConfigError::ReopeningDisabled`] if `reopen_closed` is false.
    /// - [`ConfigError::InvalidLimit`] if the limits can never allow an
    ///   expansion.
    pub fn new(task: &'t T, config: ShortestAstarConfig<T::State>) -> Result<Self, ConfigError> {
        if !config.preferred_evaluators.is_empty() {
            return Err(ConfigError::PreferredOperatorsUnsupported);
        }
        if !config.reopen_closed {
            return Err(ConfigError::ReopeningDisabled);
        }
        config.limits.validate()?;

        let notify_lazy = config.lazy_evaluator.as_ref().is_some_and(|lazy| {
            lazy.is_path_dependent() && !reaches(&config.open_evaluator, lazy.id())
        });

        Ok(Self {
            task,
            open_evaluator: config.open_evaluator,
            lazy_evaluator: config.lazy_evaluator,
            notify_lazy,
            cost_type: config.cost_type,
            limits: config.limits,
            pruning: Box::new(NullPruning),
            space: SearchSpace::new(),
            open: TieBreakingOpenList::new(),
            statistics: SearchStatistics::new(),
            started: None,
            finished: None,
            aborted: None,
            solution: None,
        })
    }

    /// Replace the pruning collaborator (default: [`NullPruning`]).
    #[must_use]
    pub fn with_pruning(mut self, pruning: Box<dyn PruningMethod<T::State>>) -> Self {
        self.pruning = pruning;
        self
    }

    /// Register and evaluate the initial state, notify path-dependent
    /// evaluators of it, and seed the open list.
    ///
    /// Called by the first [`step`](Self::step) if not called explicitly.
    ///
    /// # Errors
    ///
    /// - [`SearchError::AlreadyInitialized`] on a second call.
    /// - Any evaluator contract violation, which aborts the run.
    pub fn initialize(&mut self) -> Result<(), SearchError> {
        if self.started.is_some() {
            return Err(SearchError::AlreadyInitialized);
        }
        let seeded = self.seed();
        self.abort_on_error(seeded)
    }

    fn seed(&mut self) -> Result<(), SearchError> {
        self.started = Some(Instant::now());
        tracing::info!(
            operators = self.task.operator_count(),
            lazy = self.lazy_evaluator.as_ref().map_or("none", |l| l.name()),
            pruning = self.pruning.name(),
            "conducting best first search"
        );
        self.pruning.initialize();

        let initial = self.task.initial_state();
        let id = self.space.register(initial.clone())?;
        if self.open_evaluator.is_path_dependent() {
            self.open_evaluator.notify_initial_state(id)?;
        }
        if self.notify_lazy {
            if let Some(lazy) = &self.lazy_evaluator {
                lazy.notify_initial_state(id)?;
            }
        }

        match self.evaluate(id, &initial, 0)? {
            Some((values, lazy)) => {
                self.space.open_initial(id);
                self.open.insert(id, values, 0, lazy);
            }
            None => {
                tracing::info!("initial state is a dead end");
                let reliable = self.open_evaluator.dead_ends_are_reliable();
                self.record_dead_end(id, reliable);
            }
        }
        Ok(())
    }

    /// Run one loop iteration. After a terminal status, further calls
    /// return that status again.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on an internal invariant violation. The run
    /// is aborted: every later call returns the same error without touching
    /// the search state.
    pub fn step(&mut self) -> Result<SearchStatus, SearchError> {
        if let Some(err) = &self.aborted {
            return Err(err.clone());
        }
        if let Some(status) = self.finished {
            return Ok(status);
        }
        let advanced = self.advance();
        self.abort_on_error(advanced)
    }

    fn abort_on_error<R>(&mut self, result: Result<R, SearchError>) -> Result<R, SearchError> {
        if let Err(err) = &result {
            tracing::error!(error = %err, expanded = self.statistics.expanded, "search aborted");
            self.aborted = Some(err.clone());
        }
        result
    }

    fn advance(&mut self) -> Result<SearchStatus, SearchError> {
        if self.started.is_none() {
            self.seed()?;
        }

        let elapsed = self.started.map_or(Duration::ZERO, |t| t.elapsed());
        if self.limits.exhausted(self.statistics.expanded, elapsed) {
            tracing::warn!(
                expanded = self.statistics.expanded,
                elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                "search budget exhausted"
            );
            return Ok(self.finish(SearchStatus::BudgetExhausted));
        }

        let Some(entry) = self.open.pop() else {
            tracing::info!("completely explored state space, no solution");
            return Ok(self.finish(SearchStatus::Failed));
        };
        let id = entry.state;
        let node = self.space.node(id);
        if matches!(node.status, NodeStatus::Closed | NodeStatus::DeadEnd) || entry.g > node.g {
            self.statistics.stale_pops += 1;
            tracing::debug!(state = %id, entry_g = entry.g, g = node.g, "discarding stale entry");
            return Ok(SearchStatus::InProgress);
        }
        let state = self.space.state(id).clone();

        if let Some(lazy) = self.lazy_evaluator.clone() {
            let mut ctx = EvaluationContext::new(id, &state, node.g);
            let value = ctx.get_estimate(lazy.as_ref())?;
            if value.is_dead_end() {
                self.statistics.add_evaluated_state(ctx.evaluations());
                self.record_dead_end(id, lazy.dead_ends_are_reliable());
                return Ok(SearchStatus::InProgress);
            }
            if entry.lazy != Some(value) {
                let key = self.open_evaluator.evaluate_key(&mut ctx)?;
                self.statistics.add_evaluated_state(ctx.evaluations());
                match key {
                    Some(values) => {
                        tracing::debug!(state = %id, new = %value, "lazy value changed, reinserting");
                        self.statistics.lazy_reinsertions += 1;
                        self.open.insert(id, values, node.g, Some(value));
                    }
                    None => {
                        let reliable = self.open_evaluator.dead_ends_are_reliable();
                        self.record_dead_end(id, reliable);
                    }
                }
                return Ok(SearchStatus::InProgress);
            }
            self.statistics.add_evaluated_state(ctx.evaluations());
        }

        if self.task.is_goal(&state) {
            tracing::info!(state = %id, g = node.g, "solution found");
            self.solution = Some(id);
            return Ok(self.finish(SearchStatus::Solved));
        }

        if let Some(&f) = entry.key.values.first() {
            self.statistics.report_f_value_progress(f);
        }
        self.space.close(id);
        self.statistics.inc_expanded();

        let mut operators = self.task.applicable_operators(&state);
        let applicable = operators.len();
        self.pruning.prune_operators(&state, &mut operators);
        self.statistics.pruned_operators +=
            u64::try_from(applicable.saturating_sub(operators.len())).unwrap_or(u64::MAX);

        for op in operators {
            self.generate(id, node, &state, op)?;
        }
        Ok(SearchStatus::InProgress)
    }

    /// Step until a terminal status and log the final statistics.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on an internal invariant violation.
    pub fn search(&mut self) -> Result<SearchOutcome, SearchError> {
        let status = loop {
            match self.step()? {
                SearchStatus::InProgress => {}
                status => break status,
            }
        };
        self.statistics.log_summary();
        Ok(SearchOutcome {
            status,
            plan: self.plan(),
            statistics: self.statistics.clone(),
        })
    }

    /// The plan to the goal found so far, if any.
    #[must_use]
    pub fn plan(&self) -> Option<Plan> {
        self.solution
            .map(|goal| Plan::from_operators(self.task, &self.space.trace_path(goal)))
    }

    /// Terminal status, or `None` while the search runs or after it was
    /// aborted.
    #[must_use]
    pub fn status(&self) -> Option<SearchStatus> {
        self.finished
    }

    /// The contract violation that aborted the run, if any.
    #[must_use]
    pub fn aborted(&self) -> Option<&SearchError> {
        self.aborted.as_ref()
    }

    #[must_use]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[must_use]
    pub fn search_space(&self) -> &SearchSpace<T::State> {
        &self.space
    }

    /// Entries currently in the open list, stale ones included.
    #[must_use]
    pub fn open_list_len(&self) -> usize {
        self.open.len()
    }

    /// Every reached state with status, g and predecessor. Each entry is
    /// also emitted as a `trace` event.
    #[must_use]
    pub fn dump_search_space(&self) -> Vec<SearchSpaceEntry> {
        let dump = self.space.dump();
        for e in &dump {
            tracing::trace!(
                state = %e.state,
                status = e.status.as_str(),
                g = e.g,
                real_g = e.real_g,
                parent = ?e.parent.map(|(p, _)| p.index()),
                "search node"
            );
        }
        dump
    }

    fn generate(
        &mut self,
        parent: StateId,
        parent_node: SearchNodeInfo,
        parent_state: &T::State,
        op: OperatorId,
    ) -> Result<(), SearchError> {
        let cost = self.task.operator_cost(op);
        let succ = self.task.apply(parent_state, op);
        let succ_id = self.space.register(succ.clone())?;
        self.statistics.inc_generated();
        self.notify_transition(&Transition {
            parent,
            operator: op,
            cost,
            child: succ_id,
        })?;

        let succ_node = self.space.node(succ_id);
        if succ_node.status == NodeStatus::DeadEnd {
            return Ok(());
        }
        let g: Cost = parent_node.g.saturating_add(self.cost_type.adjust(cost));
        let real_g: Cost = parent_node.real_g.saturating_add(cost);
        if succ_node.status != NodeStatus::New && g >= succ_node.g {
            return Ok(());
        }

        let Some((values, lazy)) = self.evaluate(succ_id, &succ, g)? else {
            let reliable = self.open_evaluator.dead_ends_are_reliable();
            self.record_dead_end(succ_id, reliable);
            return Ok(());
        };
        if succ_node.status == NodeStatus::Closed {
            self.statistics.inc_reopened();
            tracing::debug!(state = %succ_id, old_g = succ_node.g, new_g = g, "reopening closed node");
        }
        self.space.open_via(succ_id, parent, op, g, real_g);
        self.open.insert(succ_id, values, g, lazy);
        Ok(())
    }

    fn notify_transition(&self, transition: &Transition) -> Result<(), SearchError> {
        if self.open_evaluator.is_path_dependent() {
            self.open_evaluator.notify_state_transition(transition)?;
        }
        if self.notify_lazy {
            if let Some(lazy) = &self.lazy_evaluator {
                lazy.notify_state_transition(transition)?;
            }
        }
        Ok(())
    }

    /// Open-list key and lazy value of `state` reached with `g`, in a fresh
    /// context. `None` if the key is a dead end.
    fn evaluate(
        &mut self,
        id: StateId,
        state: &T::State,
        g: Cost,
    ) -> Result<Option<Evaluation>, SearchError> {
        let mut ctx = EvaluationContext::new(id, state, g);
        let result = match self.open_evaluator.evaluate_key(&mut ctx)? {
            Some(values) => {
                let lazy = match &self.lazy_evaluator {
                    Some(lazy) => Some(ctx.get_estimate(lazy.as_ref())?),
                    None => None,
                };
                Some((values, lazy))
            }
            None => None,
        };
        self.statistics.add_evaluated_state(ctx.evaluations());
        Ok(result)
    }

    fn record_dead_end(&mut self, id: StateId, reliable: bool) {
        self.statistics.inc_dead_ends();
        if reliable {
            self.space.mark_dead_end(id);
        }
    }

    fn finish(&mut self, status: SearchStatus) -> SearchStatus {
        self.finished = Some(status);
        status
    }
}

/// Whether `id` is the tie-breaking evaluator itself or one of its direct
/// components, i.e. already notified through it.
fn reaches<S>(open: &TieBreakingEvaluator<S>, id: EvaluatorId) -> bool {
    open.id() == id || open.children().iter().any(|c| c.id() == id)
}
