//! Extracted plans.

use serde_json::{json, Value};
use waymark_kernel::task::{Cost, OperatorId, PlanningTask};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub operator: OperatorId,
    pub name: String,
}

/// Operator sequence from the start state to a goal, with its true cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
    pub cost: Cost,
}

impl Plan {
    /// Build a plan from an operator sequence, summing true operator costs.
    #[must_use]
    pub fn from_operators<T: PlanningTask>(task: &T, operators: &[OperatorId]) -> Self {
        let steps = operators
            .iter()
            .map(|&op| PlanStep {
                operator: op,
                name: task.operator_name(op).to_string(),
            })
            .collect();
        let cost = operators
            .iter()
            .map(|&op| task.operator_cost(op))
            .fold(0, Cost::saturating_add);
        Self { steps, cost }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Operator names in order.
    #[must_use]
    pub fn operator_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "cost": self.cost,
            "length": self.steps.len(),
            "operators": self.operator_names(),
        })
    }
}
