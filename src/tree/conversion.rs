use super::DecisionTree;
use crate::error::TreeConversionError;

/// A trait for custom tree models that can be converted into a `DecisionTree`.
///
/// This is the extension point for storage or editor formats that do not
/// match the engine's wire shape. Implement it on your own structs and hand the
/// result to a [`TreeSchema`](crate::validator::TreeSchema) for validation.
///
/// # Example
///
/// ```rust,no_run
/// use kettei::prelude::*;
///
/// struct Rule {
///     outcome: String,
/// }
///
/// impl IntoTree for Rule {
///     fn into_tree(self) -> std::result::Result<DecisionTree, TreeConversionError> {
///         if self.outcome.is_empty() {
///             return Err(TreeConversionError::Invalid("rule has no outcome".into()));
///         }
///         Ok(DecisionTree {
///             nodes: vec![
///                 Node::start("start", "Start"),
///                 Node::result("result", serde_json::json!({ "outcome": self.outcome })),
///             ],
///             edges: vec![create_edge("start", "result", EdgeType::Default)],
///         })
///     }
/// }
/// ```
pub trait IntoTree {
    /// Consumes the object and converts it into the engine's tree model.
    fn into_tree(self) -> Result<DecisionTree, TreeConversionError>;
}

impl IntoTree for DecisionTree {
    fn into_tree(self) -> Result<DecisionTree, TreeConversionError> {
        Ok(self)
    }
}
