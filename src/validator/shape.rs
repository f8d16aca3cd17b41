use crate::condition::ConditionGroup;
use crate::domain::Domain;
use crate::tree::Node;
use std::sync::Arc;

/// Checks a single node in isolation. Returns one message per problem.
pub trait NodeShape: Send + Sync {
    fn check(&self, node: &Node) -> Vec<String>;
}

impl<F> NodeShape for F
where
    F: Fn(&Node) -> Vec<String> + Send + Sync,
{
    fn check(&self, node: &Node) -> Vec<String> {
        self(node)
    }
}

/// Accepts any well-typed node. Only the invariants every domain shares are
/// checked: ids are non-empty and groups hold at least one condition.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyNodeShape;

impl NodeShape for AnyNodeShape {
    fn check(&self, node: &Node) -> Vec<String> {
        let mut problems = Vec::new();
        if node.id().trim().is_empty() {
            problems.push(format!("{} node has an empty id", node.kind()));
        }
        if let Some(group) = node.as_condition_group() {
            problems.extend(check_group_not_empty(&group.data.group));
        }
        problems
    }
}

fn check_group_not_empty(group: &ConditionGroup) -> Option<String> {
    group
        .conditions
        .is_empty()
        .then(|| "Condition group must contain at least one condition".to_string())
}

/// Validates nodes against a domain: conditions through the domain's
/// condition validator and result payloads through its result validator.
#[derive(Debug, Clone)]
pub struct DomainNodeShape {
    domain: Arc<Domain>,
}

impl DomainNodeShape {
    pub fn new(domain: Arc<Domain>) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }
}

impl NodeShape for DomainNodeShape {
    fn check(&self, node: &Node) -> Vec<String> {
        let mut problems = AnyNodeShape.check(node);
        match node {
            Node::Start(_) => {}
            Node::Condition(n) => {
                problems.extend(self.domain.validate_condition(&n.data.condition));
            }
            Node::ConditionGroup(n) => {
                for (i, condition) in n.data.group.conditions.iter().enumerate() {
                    problems.extend(
                        self.domain
                            .validate_condition(condition)
                            .into_iter()
                            .map(|p| format!("Condition {}: {}", i + 1, p)),
                    );
                }
            }
            Node::Result(n) => problems.extend(self.domain.validate_result(&n.data)),
        }
        problems
    }
}
