use super::{NodeShape, TreeRule, Violation};
use crate::tree::{DecisionTree, EdgeType, Node};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// Runs the schema's [`NodeShape`] over every node.
pub struct NodeShapeRule {
    shape: Box<dyn NodeShape>,
}

impl NodeShapeRule {
    pub const NAME: &'static str = "node-shape";

    pub fn new(shape: Box<dyn NodeShape>) -> Self {
        Self { shape }
    }
}

impl TreeRule for NodeShapeRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, tree: &DecisionTree) -> Vec<Violation> {
        tree.nodes
            .iter()
            .flat_map(|node| {
                self.shape.check(node).into_iter().map(move |problem| {
                    Violation::new(Self::NAME, format!("Node '{}': {}", node.id(), problem))
                        .at_node(node.id())
                })
            })
            .collect()
    }
}

/// Exactly one START node.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleStartRule;

impl SingleStartRule {
    pub const NAME: &'static str = "single-start";
}

impl TreeRule for SingleStartRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, tree: &DecisionTree) -> Vec<Violation> {
        let found = tree.start_nodes().count();
        if found == 1 {
            return Vec::new();
        }
        vec![Violation::new(
            Self::NAME,
            format!("Tree must have exactly one start node (found {})", found),
        )]
    }
}

/// At least `min` RESULT nodes.
#[derive(Debug, Clone, Copy)]
pub struct MinResultNodesRule {
    min: usize,
}

impl MinResultNodesRule {
    pub const NAME: &'static str = "min-result-nodes";

    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl TreeRule for MinResultNodesRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, tree: &DecisionTree) -> Vec<Violation> {
        let found = tree.result_nodes().count();
        if found >= self.min {
            return Vec::new();
        }
        vec![Violation::new(
            Self::NAME,
            format!(
                "Tree must have at least {} result node(s) (found {})",
                self.min, found
            ),
        )]
    }
}

/// Every edge's source and target name an existing node.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeReferencesRule;

impl EdgeReferencesRule {
    pub const NAME: &'static str = "edge-references";
}

impl TreeRule for EdgeReferencesRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, tree: &DecisionTree) -> Vec<Violation> {
        let ids: AHashSet<&str> = tree.nodes.iter().map(Node::id).collect();
        let mut violations = Vec::new();
        for edge in &tree.edges {
            for (end, node_id) in [("source", &edge.source), ("target", &edge.target)] {
                if !ids.contains(node_id.as_str()) {
                    violations.push(
                        Violation::new(
                            Self::NAME,
                            format!(
                                "Edge '{}' references unknown {} node '{}'",
                                edge.id, end, node_id
                            ),
                        )
                        .at_edge(&edge.id),
                    );
                }
            }
        }
        violations
    }
}

/// Every non-START node is the target of some edge. START is the entry point
/// and is exempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectedNodesRule;

impl ConnectedNodesRule {
    pub const NAME: &'static str = "connected-nodes";
}

impl TreeRule for ConnectedNodesRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, tree: &DecisionTree) -> Vec<Violation> {
        let targets: AHashSet<&str> = tree.edges.iter().map(|e| e.target.as_str()).collect();
        tree.nodes
            .iter()
            .filter(|node| !node.is_start() && !targets.contains(node.id()))
            .map(|node| {
                Violation::new(
                    Self::NAME,
                    format!("Node '{}' is not connected: no edge targets it", node.id()),
                )
                .at_node(node.id())
            })
            .collect()
    }
}

/// Every CONDITION node has exactly one `yes` and one `no` outgoing edge.
///
/// Not part of the default schema; domains whose evaluators branch on a
/// boolean opt in with [`TreeSchemaBuilder::with_rule`](super::TreeSchemaBuilder::with_rule).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionBranchesRule;

impl ConditionBranchesRule {
    pub const NAME: &'static str = "condition-branches";
}

impl TreeRule for ConditionBranchesRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, tree: &DecisionTree) -> Vec<Violation> {
        let mut violations = Vec::new();
        for node in tree.nodes.iter().filter(|n| n.is_condition()) {
            let branches = tree.outgoing(node.id()).map(|e| e.branch()).counts();
            for branch in [EdgeType::Yes, EdgeType::No] {
                let found = branches.get(&branch).copied().unwrap_or(0);
                if found != 1 {
                    violations.push(
                        Violation::new(
                            Self::NAME,
                            format!(
                                "Condition node '{}' must have exactly one '{}' edge (found {})",
                                node.id(),
                                branch,
                                found
                            ),
                        )
                        .at_node(node.id()),
                    );
                }
            }
        }
        violations
    }
}

/// No cycle is reachable from the START node.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcyclicRule;

impl AcyclicRule {
    pub const NAME: &'static str = "acyclic";
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl TreeRule for AcyclicRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, tree: &DecisionTree) -> Vec<Violation> {
        let mut adjacency: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for edge in &tree.edges {
            adjacency
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }

        let mut marks: AHashMap<&str, Mark> = AHashMap::new();
        let mut cycle_entries: Vec<&str> = Vec::new();

        for start in tree.start_nodes() {
            // Iterative DFS: (node, index of next child to visit).
            let mut stack: Vec<(&str, usize)> = vec![(start.id(), 0)];
            marks.insert(start.id(), Mark::Visiting);

            while let Some((node, child)) = stack.pop() {
                let children = adjacency.get(node).map(Vec::as_slice).unwrap_or(&[]);
                match children.get(child) {
                    Some(&next) => {
                        stack.push((node, child + 1));
                        match marks.get(next) {
                            Some(Mark::Visiting) => {
                                if !cycle_entries.contains(&next) {
                                    cycle_entries.push(next);
                                }
                            }
                            Some(Mark::Done) => {}
                            None => {
                                marks.insert(next, Mark::Visiting);
                                stack.push((next, 0));
                            }
                        }
                    }
                    None => {
                        marks.insert(node, Mark::Done);
                    }
                }
            }
        }

        cycle_entries
            .into_iter()
            .map(|id| {
                Violation::new(
                    Self::NAME,
                    format!("Cycle detected: node '{}' is reachable from itself", id),
                )
                .at_node(id)
            })
            .collect()
    }
}

/// A rule backed by a predicate: reports `message` when the predicate fails.
pub struct FnRule {
    name: String,
    message: String,
    check: Box<dyn Fn(&DecisionTree) -> bool + Send + Sync>,
}

impl FnRule {
    pub const NAME: &'static str = "custom";

    pub fn new<F>(message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&DecisionTree) -> bool + Send + Sync + 'static,
    {
        Self {
            name: Self::NAME.to_string(),
            message: message.into(),
            check: Box::new(check),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl TreeRule for FnRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, tree: &DecisionTree) -> Vec<Violation> {
        if (self.check)(tree) {
            Vec::new()
        } else {
            vec![Violation::new(self.name.clone(), self.message.clone())]
        }
    }
}
