use crate::operator::Operator;
use crate::value::ConditionValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single test of one field.
///
/// `value` must match the shape the resolver dictates for the field's type and
/// `operator`; it is absent for no-value operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConditionValue>,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: Option<ConditionValue>) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "${} {} {}", self.field, self.operator.label(), value),
            None => write!(f, "${} {}", self.field, self.operator.label()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

/// Several conditions joined by one logical operator. Must hold at least one
/// condition; node-shape validation rejects empty groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub operator: LogicalOperator,
    pub conditions: Vec<Condition>,
}

impl ConditionGroup {
    pub fn new(operator: LogicalOperator, conditions: Vec<Condition>) -> Self {
        Self {
            operator,
            conditions,
        }
    }
}

impl fmt::Display for ConditionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joiner = format!(" {} ", self.operator.as_str());
        let parts: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
        write!(f, "({})", parts.join(&joiner))
    }
}
