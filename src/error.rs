use crate::validator::Violation;
use thiserror::Error;

/// Raised when parsing an operator identifier that names no known operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown operator '{0}'")]
pub struct UnknownOperator(pub String);

/// Errors from looking up domains in a [`DomainRegistry`](crate::domain::DomainRegistry).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A tree or caller referenced a domain that was never registered. This is a
    /// configuration error and is expected to surface at startup.
    #[error("Domain '{0}' is not registered")]
    DomainNotFound(String),
}

/// A tree failed structural validation.
#[derive(Error, Debug, Clone)]
#[error("Decision tree is invalid: {}", format_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// The violation messages, in evaluation order.
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// `true` if any violation came from the rule named `rule`.
    pub fn violates(&self, rule: &str) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur when converting a custom model into a `DecisionTree`.
#[derive(Error, Debug, Clone)]
pub enum TreeConversionError {
    #[error("Invalid custom data: {0}")]
    Invalid(String),
}

/// Errors from loading trees, domain definitions or configuration documents.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
