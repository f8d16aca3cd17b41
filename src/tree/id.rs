use super::NodeKind;
use uuid::Uuid;

/// A fresh node id of the form `{kind}-{uuid}`, e.g. `condition-9b2f…`.
pub fn create_node_id(kind: NodeKind) -> String {
    format!("{}-{}", kind.id_prefix(), Uuid::new_v4().simple())
}

pub fn create_edge_id() -> String {
    format!("edge-{}", Uuid::new_v4().simple())
}
