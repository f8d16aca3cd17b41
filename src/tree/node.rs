use crate::condition::{Condition, ConditionGroup, LogicalOperator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout hint from the graph editor. The engine never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Start,
    Condition,
    ConditionGroup,
    Result,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Start => "START",
            NodeKind::Condition => "CONDITION",
            NodeKind::ConditionGroup => "CONDITION_GROUP",
            NodeKind::Result => "RESULT",
        }
    }

    /// Lowercase prefix used in generated node ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::Condition => "condition",
            NodeKind::ConditionGroup => "condition_group",
            NodeKind::Result => "result",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartData {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionData {
    pub condition: Condition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroupData {
    #[serde(flatten)]
    pub group: ConditionGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartNode {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    pub data: StartData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionNode {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    pub data: ConditionData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroupNode {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    pub data: ConditionGroupData,
}

/// A terminal outcome. `data` is the domain's payload, e.g. a payment flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultNode {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    pub data: serde_json::Value,
}

/// A node of a decision tree, tagged on the wire by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Node {
    Start(StartNode),
    Condition(ConditionNode),
    ConditionGroup(ConditionGroupNode),
    Result(ResultNode),
}

impl Node {
    pub fn start(id: impl Into<String>, label: impl Into<String>) -> Self {
        Node::Start(StartNode {
            id: id.into(),
            position: Position::default(),
            data: StartData {
                label: label.into(),
            },
        })
    }

    pub fn condition(id: impl Into<String>, condition: Condition) -> Self {
        Node::Condition(ConditionNode {
            id: id.into(),
            position: Position::default(),
            data: ConditionData {
                condition,
                label: None,
            },
        })
    }

    pub fn condition_group(
        id: impl Into<String>,
        operator: LogicalOperator,
        conditions: Vec<Condition>,
    ) -> Self {
        Node::ConditionGroup(ConditionGroupNode {
            id: id.into(),
            position: Position::default(),
            data: ConditionGroupData {
                group: ConditionGroup::new(operator, conditions),
                label: None,
            },
        })
    }

    pub fn result(id: impl Into<String>, data: serde_json::Value) -> Self {
        Node::Result(ResultNode {
            id: id.into(),
            position: Position::default(),
            data,
        })
    }

    pub fn at(mut self, position: Position) -> Self {
        *self.position_mut() = position;
        self
    }

    pub fn id(&self) -> &str {
        match self {
            Node::Start(n) => &n.id,
            Node::Condition(n) => &n.id,
            Node::ConditionGroup(n) => &n.id,
            Node::Result(n) => &n.id,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Node::Start(n) => n.position,
            Node::Condition(n) => n.position,
            Node::ConditionGroup(n) => n.position,
            Node::Result(n) => n.position,
        }
    }

    fn position_mut(&mut self) -> &mut Position {
        match self {
            Node::Start(n) => &mut n.position,
            Node::Condition(n) => &mut n.position,
            Node::ConditionGroup(n) => &mut n.position,
            Node::Result(n) => &mut n.position,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Start(_) => NodeKind::Start,
            Node::Condition(_) => NodeKind::Condition,
            Node::ConditionGroup(_) => NodeKind::ConditionGroup,
            Node::Result(_) => NodeKind::Result,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, Node::Start(_))
    }

    pub fn is_condition(&self) -> bool {
        matches!(self, Node::Condition(_))
    }

    pub fn is_condition_group(&self) -> bool {
        matches!(self, Node::ConditionGroup(_))
    }

    pub fn is_result(&self) -> bool {
        matches!(self, Node::Result(_))
    }

    pub fn as_start(&self) -> Option<&StartNode> {
        match self {
            Node::Start(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_condition(&self) -> Option<&ConditionNode> {
        match self {
            Node::Condition(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_condition_group(&self) -> Option<&ConditionGroupNode> {
        match self {
            Node::ConditionGroup(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_result(&self) -> Option<&ResultNode> {
        match self {
            Node::Result(n) => Some(n),
            _ => None,
        }
    }
}
