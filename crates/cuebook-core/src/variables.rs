use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::identifiers::VariableId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    Number,
    Boolean,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum VariableValue {
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl Default for VariableValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl VariableValue {
    /// Numeric coercion: booleans map to 0/1, non-numeric text to 0.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Boolean(value) => {
                if *value {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Text(value) => value.trim().parse().unwrap_or(0.0),
        }
    }

    /// Boolean coercion: nonzero numbers are true, text passes a
    /// case-insensitive "true" test.
    pub fn as_boolean(&self) -> bool {
        match self {
            Self::Boolean(value) => *value,
            Self::Number(value) => *value != 0.0,
            Self::Text(value) => value.trim().eq_ignore_ascii_case("true"),
        }
    }

    /// Canonical text form used for case-insensitive comparisons: integral
    /// numbers render without a fractional part so `10` equals `"10"`.
    pub fn canonical_text(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Boolean(value) => value.to_string(),
            Self::Number(value) => {
                if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
                    format!("{}", *value as i64)
                } else {
                    format!("{value}")
                }
            }
        }
    }

    pub fn coerced_to(&self, declared: VariableType) -> VariableValue {
        match declared {
            VariableType::Number => Self::Number(self.as_number()),
            VariableType::Boolean => Self::Boolean(self.as_boolean()),
            VariableType::Text => self.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetVariableOperator {
    Set,
    Add,
    Subtract,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
    pub name: String,
    pub variable_type: VariableType,
    pub default: VariableValue,
}

/// Transient `variable id -> value` map for one replay pass. Seeded from
/// declared defaults, mutated only by `SetVariable` effects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableEnvironment {
    values: HashMap<VariableId, VariableValue>,
}

impl VariableEnvironment {
    pub fn seeded_from(variables: &[Variable]) -> Self {
        let values = variables
            .iter()
            .map(|variable| (variable.id.clone(), variable.default.clone()))
            .collect();
        Self { values }
    }

    pub fn get(&self, variable_id: &VariableId) -> Option<&VariableValue> {
        self.values.get(variable_id)
    }

    pub fn set(&mut self, variable_id: VariableId, value: VariableValue) {
        self.values.insert(variable_id, value);
    }

    /// Applies one `SetVariable` effect. `add`/`subtract` accumulate
    /// numerically against the current value (or 0 when the variable was
    /// never seeded); any other operator assigns, coerced to the declared
    /// type when one is known.
    pub fn apply_assignment(
        &mut self,
        variable_id: &VariableId,
        operator: SetVariableOperator,
        value: &VariableValue,
        declared: Option<VariableType>,
    ) {
        let next = match operator {
            SetVariableOperator::Add | SetVariableOperator::Subtract => {
                let current = self
                    .values
                    .get(variable_id)
                    .map(VariableValue::as_number)
                    .unwrap_or(0.0);
                let delta = value.as_number();
                let total = match operator {
                    SetVariableOperator::Add => current + delta,
                    _ => current - delta,
                };
                VariableValue::Number(total)
            }
            SetVariableOperator::Set => match declared {
                Some(declared) => value.coerced_to(declared),
                None => value.clone(),
            },
        };
        self.values.insert(variable_id.clone(), next);
    }
}
