use serde::{Deserialize, Serialize};

use crate::identifiers::VariableId;
use crate::variables::{VariableEnvironment, VariableValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    IsTrue,
    IsFalse,
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Contains,
    StartsWith,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub variable_id: VariableId,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: VariableValue,
}

impl Condition {
    /// A condition on a variable the environment has never seen is false, not
    /// an error: the authoring surface keeps replaying while the reference is
    /// dangling.
    pub fn evaluate(&self, environment: &VariableEnvironment) -> bool {
        let Some(current) = environment.get(&self.variable_id) else {
            tracing::warn!(
                variable_id = self.variable_id.as_str(),
                "condition references an unknown variable; treating as false"
            );
            return false;
        };
        match self.operator {
            ConditionOperator::IsTrue => current.as_boolean(),
            ConditionOperator::IsFalse => !current.as_boolean(),
            ConditionOperator::Equals => canonical_eq(current, &self.value),
            ConditionOperator::NotEquals => !canonical_eq(current, &self.value),
            ConditionOperator::GreaterThan => current.as_number() > self.value.as_number(),
            ConditionOperator::LessThan => current.as_number() < self.value.as_number(),
            ConditionOperator::GreaterOrEqual => current.as_number() >= self.value.as_number(),
            ConditionOperator::LessOrEqual => current.as_number() <= self.value.as_number(),
            ConditionOperator::Contains => {
                lowered(current).contains(&lowered(&self.value))
            }
            ConditionOperator::StartsWith => {
                lowered(current).starts_with(&lowered(&self.value))
            }
        }
    }
}

fn canonical_eq(left: &VariableValue, right: &VariableValue) -> bool {
    lowered(left) == lowered(right)
}

fn lowered(value: &VariableValue) -> String {
    value.canonical_text().to_lowercase()
}

/// An empty list is vacuously true; otherwise the list is an implicit AND.
pub fn evaluate_all(conditions: &[Condition], environment: &VariableEnvironment) -> bool {
    conditions
        .iter()
        .all(|condition| condition.evaluate(environment))
}
