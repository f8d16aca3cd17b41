//! Common test utilities for building catalogs, domains and trees.
use kettei::prelude::*;
use std::sync::Arc;

/// A payment-routing catalog covering every field type.
#[allow(dead_code)]
pub fn payment_fields() -> FieldCatalog {
    FieldCatalog::new()
        .with(FieldDefinition::new("price", "Price", FieldType::Numeric))
        .with(FieldDefinition::new("createdAt", "Created at", FieldType::Date))
        .with(
            FieldDefinition::new("tags", "Customer tags", FieldType::Relation)
                .with_operators([Operator::In, Operator::Eq, Operator::HasAny]),
        )
        .with(FieldDefinition::new("country", "Country", FieldType::Location))
        .with(FieldDefinition::new("method", "Payment method", FieldType::Enum))
        .with(FieldDefinition::new("cutoff", "Cut-off time", FieldType::Time))
        .with(FieldDefinition::new("note", "Order note", FieldType::String))
        .with(FieldDefinition::new("isVip", "VIP customer", FieldType::Boolean))
        .with(FieldDefinition::new("amount", "Amount", FieldType::Currency))
        .with(FieldDefinition::new("holdPeriod", "Hold period", FieldType::Duration))
}

#[allow(dead_code)]
pub fn payment_domain() -> Domain {
    Domain::builder("payments")
        .fields(payment_fields())
        .with_result_validator(|payload| {
            if payload.get("flow").and_then(|f| f.as_str()).is_some() {
                Vec::new()
            } else {
                vec!["result must name a payment flow".to_string()]
            }
        })
        .build()
}

#[allow(dead_code)]
pub fn payment_shape() -> DomainNodeShape {
    DomainNodeShape::new(Arc::new(payment_domain()))
}

fn edge(id: &str, source: &str, target: &str, edge_type: EdgeType) -> Edge {
    let mut edge = create_edge(source, target, edge_type);
    edge.id = id.to_string();
    edge
}

/// A valid tree.
///
/// Logic: `$price > 100` -> "card", otherwise -> "wallet"
#[allow(dead_code)]
pub fn simple_tree() -> DecisionTree {
    DecisionTree::new(
        vec![
            Node::start("start", "Start"),
            Node::condition(
                "check-price",
                Condition::new("price", Operator::Gt, Some(ConditionValue::number(100.0))),
            ),
            Node::result("card", serde_json::json!({ "flow": "card" })),
            Node::result("wallet", serde_json::json!({ "flow": "wallet" })),
        ],
        vec![
            edge("e1", "start", "check-price", EdgeType::Default),
            edge("e2", "check-price", "card", EdgeType::Yes),
            edge("e3", "check-price", "wallet", EdgeType::No),
        ],
    )
}

/// A tree with a condition group in front of the price check.
///
/// Logic: `($country exists AND $isVip is true)` -> price check, otherwise -> "manual"
#[allow(dead_code)]
pub fn grouped_tree() -> DecisionTree {
    let mut tree = simple_tree();
    tree.nodes.push(Node::condition_group(
        "vip-group",
        LogicalOperator::And,
        vec![
            Condition::new("country", Operator::Exists, None),
            Condition::new("isVip", Operator::IsTrue, None),
        ],
    ));
    tree.nodes
        .push(Node::result("manual", serde_json::json!({ "flow": "manual_review" })));
    tree.edges[0].target = "vip-group".to_string();
    tree.edges
        .push(edge("e4", "vip-group", "check-price", EdgeType::Yes));
    tree.edges.push(edge("e5", "vip-group", "manual", EdgeType::No));
    tree
}

/// The simple tree as the authoring surface stores it.
#[allow(dead_code)]
pub const SIMPLE_TREE_JSON: &str = r#"{
  "nodes": [
    { "id": "start", "type": "START", "position": { "x": 0, "y": 0 }, "data": { "label": "Start" } },
    {
      "id": "check-price",
      "type": "CONDITION",
      "position": { "x": 0, "y": 150 },
      "data": { "condition": { "field": "price", "operator": "BETWEEN", "value": { "min": 10, "max": 250 } } }
    },
    {
      "id": "recent",
      "type": "CONDITION_GROUP",
      "position": { "x": -200, "y": 300 },
      "data": {
        "operator": "OR",
        "label": "Recent or VIP",
        "conditions": [
          { "field": "createdAt", "operator": "WITHIN_LAST", "value": { "amount": 7, "unit": "DAYS" } },
          { "field": "cutoff", "operator": "BETWEEN", "value": { "from": "09:00", "to": "17:30" } },
          { "field": "isVip", "operator": "IS_TRUE" }
        ]
      }
    },
    { "id": "card", "type": "RESULT", "position": { "x": -300, "y": 450 }, "data": { "flow": "card" } },
    { "id": "wallet", "type": "RESULT", "position": { "x": 200, "y": 300 }, "data": { "flow": "wallet" } },
    { "id": "review", "type": "RESULT", "position": { "x": -100, "y": 450 }, "data": { "flow": "manual_review" } }
  ],
  "edges": [
    { "id": "e1", "source": "start", "target": "check-price", "data": { "type": "default" } },
    { "id": "e2", "source": "check-price", "target": "recent", "sourceHandle": "yes", "data": { "type": "yes" } },
    { "id": "e3", "source": "check-price", "target": "wallet", "sourceHandle": "no", "data": { "type": "no" } },
    { "id": "e4", "source": "recent", "target": "card", "sourceHandle": "yes" },
    { "id": "e5", "source": "recent", "target": "review", "sourceHandle": "no" }
  ]
}"#;
