//! Structural validation of whole decision trees.
//!
//! A [`TreeSchema`] is composed from a caller-supplied [`NodeShape`] and an
//! ordered list of [`TreeRule`]s. Validation is stateless and re-runs over the
//! whole graph on every call; it never repairs a tree.

use crate::config::EngineConfig;
use crate::error::ValidationError;
use crate::tree::DecisionTree;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

mod rules;
mod shape;

pub use rules::*;
pub use shape::{AnyNodeShape, DomainNodeShape, NodeShape};

/// One broken structural rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Name of the rule that produced this violation.
    pub rule: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,
}

impl Violation {
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            node_id: None,
            edge_id: None,
        }
    }

    pub fn at_node(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn at_edge(mut self, edge_id: impl Into<String>) -> Self {
        self.edge_id = Some(edge_id.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

/// A structural rule over a whole tree.
pub trait TreeRule: Send + Sync {
    fn name(&self) -> &str;
    fn evaluate(&self, tree: &DecisionTree) -> Vec<Violation>;
}

/// How many violations a schema reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportMode {
    /// Every violation of every rule.
    #[default]
    All,
    /// Only the first violation found.
    FirstFailure,
}

/// A validator for decision trees.
///
/// Rules run in this order: node shape, single start, minimum results, edge
/// references, connectivity, then custom rules in registration order.
pub struct TreeSchema {
    rules: Vec<Box<dyn TreeRule>>,
    report: ReportMode,
}

impl TreeSchema {
    pub fn builder(node_shape: impl NodeShape + 'static) -> TreeSchemaBuilder {
        TreeSchemaBuilder::new(node_shape)
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn report_mode(&self) -> ReportMode {
        self.report
    }

    /// Every violation found, honouring the report mode. Empty means valid.
    pub fn violations(&self, tree: &DecisionTree) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in &self.rules {
            violations.extend(rule.evaluate(tree));
            if self.report == ReportMode::FirstFailure && !violations.is_empty() {
                violations.truncate(1);
                break;
            }
        }
        violations
    }

    pub fn validate(&self, tree: &DecisionTree) -> Result<(), ValidationError> {
        debug!(
            nodes = tree.nodes.len(),
            edges = tree.edges.len(),
            rules = self.rules.len(),
            "validating decision tree"
        );
        let violations = self.violations(tree);
        if violations.is_empty() {
            debug!("decision tree is valid");
            Ok(())
        } else {
            debug!(violations = violations.len(), "decision tree is invalid");
            Err(ValidationError::new(violations))
        }
    }

    pub fn is_valid(&self, tree: &DecisionTree) -> bool {
        self.violations(tree).is_empty()
    }
}

impl fmt::Debug for TreeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeSchema")
            .field("rules", &self.rule_names())
            .field("report", &self.report)
            .finish()
    }
}

pub struct TreeSchemaBuilder {
    node_shape: Box<dyn NodeShape>,
    min_result_nodes: usize,
    custom_rules: Vec<Box<dyn TreeRule>>,
    report: ReportMode,
}

impl TreeSchemaBuilder {
    pub fn new(node_shape: impl NodeShape + 'static) -> Self {
        Self {
            node_shape: Box::new(node_shape),
            min_result_nodes: 1,
            custom_rules: Vec::new(),
            report: ReportMode::All,
        }
    }

    pub fn min_result_nodes(mut self, min: usize) -> Self {
        self.min_result_nodes = min;
        self
    }

    pub fn report(mut self, mode: ReportMode) -> Self {
        self.report = mode;
        self
    }

    pub fn fail_fast(self) -> Self {
        self.report(ReportMode::FirstFailure)
    }

    /// Appends a domain-specific rule. Custom rules run after the built-in
    /// ones, in the order they were added.
    pub fn with_rule(mut self, rule: impl TreeRule + 'static) -> Self {
        self.custom_rules.push(Box::new(rule));
        self
    }

    /// Appends a predicate rule that reports `message` when `check` returns
    /// `false`.
    pub fn with_validation<F>(self, message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&DecisionTree) -> bool + Send + Sync + 'static,
    {
        self.with_rule(FnRule::new(message, check))
    }

    /// Applies `config`: result minimum, report mode and the opt-in rules.
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.min_result_nodes = config.min_result_nodes;
        self.report = config.report;
        if config.require_condition_branches {
            self = self.with_rule(ConditionBranchesRule);
        }
        if config.forbid_cycles {
            self = self.with_rule(AcyclicRule);
        }
        self
    }

    pub fn build(self) -> TreeSchema {
        let mut rules: Vec<Box<dyn TreeRule>> = vec![
            Box::new(NodeShapeRule::new(self.node_shape)),
            Box::new(SingleStartRule),
            Box::new(MinResultNodesRule::new(self.min_result_nodes)),
            Box::new(EdgeReferencesRule),
            Box::new(ConnectedNodesRule),
        ];
        rules.extend(self.custom_rules);
        TreeSchema {
            rules,
            report: self.report,
        }
    }
}
