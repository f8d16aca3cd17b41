use crate::error::LoadError;
use crate::validator::ReportMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine-wide validation settings, usually loaded from a JSON document.
///
/// Every key is optional:
///
/// ```json
/// { "minResultNodes": 2, "report": "firstFailure", "requireConditionBranches": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Fewest RESULT nodes a tree may have.
    pub min_result_nodes: usize,
    pub report: ReportMode,
    /// Require one `yes` and one `no` edge out of every CONDITION node.
    pub require_condition_branches: bool,
    /// Reject trees with a cycle reachable from START.
    pub forbid_cycles: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_result_nodes: 1,
            report: ReportMode::All,
            require_condition_branches: false,
            forbid_cycles: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}
