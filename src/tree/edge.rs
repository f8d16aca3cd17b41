use super::id::create_edge_id;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which logical branch of its source node an edge follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    #[default]
    Default,
    Yes,
    No,
    Output,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Default => "default",
            EdgeType::Yes => "yes",
            EdgeType::No => "no",
            EdgeType::Output => "output",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

/// A directed transition between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<EdgeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

impl Edge {
    /// The branch this edge follows: `data.type`, then `sourceHandle`, then
    /// `default`.
    pub fn branch(&self) -> EdgeType {
        self.data
            .map(|d| d.edge_type)
            .or(self.source_handle)
            .unwrap_or_default()
    }
}

/// Connects `source` to `target` on the given branch. The default branch
/// carries no source handle; `data.type` always names the branch.
pub fn create_edge(
    source: impl Into<String>,
    target: impl Into<String>,
    edge_type: EdgeType,
) -> Edge {
    Edge {
        id: create_edge_id(),
        source: source.into(),
        target: target.into(),
        source_handle: match edge_type {
            EdgeType::Default => None,
            other => Some(other),
        },
        data: Some(EdgeData { edge_type }),
    }
}
