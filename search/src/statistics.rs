//! Run counters and f-value progress.

use serde_json::{json, Value};

/// Counters collected during one run. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Nodes closed and expanded.
    pub expanded: u64,
    /// Distinct states for which a context was evaluated.
    pub evaluated_states: u64,
    /// Counted evaluator computations (cache hits excluded).
    pub evaluations: u64,
    /// Successors generated.
    pub generated: u64,
    /// Closed nodes moved back to open.
    pub reopened: u64,
    /// States recognized as dead ends.
    pub dead_ends: u64,
    /// Pops that were reinserted because the lazy value changed.
    pub lazy_reinsertions: u64,
    /// Superseded open-list entries discarded on pop.
    pub stale_pops: u64,
    /// Operators removed by the pruning collaborator.
    pub pruned_operators: u64,
    /// Largest f-value of an expanded node so far.
    pub last_f: Option<i64>,
}

impl SearchStatistics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_expanded(&mut self) {
        self.expanded += 1;
    }

    pub fn inc_generated(&mut self) {
        self.generated += 1;
    }

    pub fn inc_reopened(&mut self) {
        self.reopened += 1;
    }

    pub fn inc_dead_ends(&mut self) {
        self.dead_ends += 1;
    }

    /// Account for one evaluated context with `evaluations` counted
    /// computations.
    pub fn add_evaluated_state(&mut self, evaluations: u64) {
        self.evaluated_states += 1;
        self.evaluations += evaluations;
    }

    /// Record the f-value of a node about to be expanded. Logs a progress
    /// line and returns `true` when `f` exceeds every f seen before.
    pub fn report_f_value_progress(&mut self, f: i64) -> bool {
        if self.last_f.is_some_and(|last| f <= last) {
            return false;
        }
        self.last_f = Some(f);
        tracing::info!(
            f,
            evaluated = self.evaluated_states,
            expanded = self.expanded,
            "f = {f}"
        );
        true
    }

    /// Emit the final counters as a single `info` event.
    pub fn log_summary(&self) {
        tracing::info!(
            expanded = self.expanded,
            reopened = self.reopened,
            evaluated = self.evaluated_states,
            evaluations = self.evaluations,
            generated = self.generated,
            dead_ends = self.dead_ends,
            lazy_reinsertions = self.lazy_reinsertions,
            stale_pops = self.stale_pops,
            pruned_operators = self.pruned_operators,
            "search statistics"
        );
    }

    /// Integer-only JSON object, suitable for canonical serialization.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        let mut value = json!({
            "expanded": self.expanded,
            "evaluated_states": self.evaluated_states,
            "evaluations": self.evaluations,
            "generated": self.generated,
            "reopened": self.reopened,
            "dead_ends": self.dead_ends,
            "lazy_reinsertions": self.lazy_reinsertions,
            "stale_pops": self.stale_pops,
            "pruned_operators": self.pruned_operators,
        });
        if let (Some(f), Some(obj)) = (self.last_f, value.as_object_mut()) {
            obj.insert("last_f".into(), json!(f));
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_progress_reports_only_increases() {
        let mut stats = SearchStatistics::new();
        assert!(stats.report_f_value_progress(3));
        assert!(!stats.report_f_value_progress(3));
        assert!(!stats.report_f_value_progress(2));
        assert!(stats.report_f_value_progress(5));
        assert_eq!(stats.last_f, Some(5));
    }

    #[test]
    fn json_contains_counters() {
        let mut stats = SearchStatistics::new();
        stats.inc_expanded();
        stats.add_evaluated_state(2);
        stats.add_evaluated_state(0);
        let v = stats.to_json_value();
        assert_eq!(v["expanded"], 1);
        assert_eq!(v["evaluated_states"], 2);
        assert_eq!(v["evaluations"], 2);
        assert!(v.get("last_f").is_none());

        stats.report_f_value_progress(7);
        assert_eq!(stats.to_json_value()["last_f"], 7);
    }
}
