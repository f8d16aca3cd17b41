//! # Kettei - Rule and Decision-Tree Engine
//!
//! **Kettei** lets non-engineers compose branching business policies ("which
//! payment flow handles this transaction", "does this cart qualify for a
//! discount") as a graph of typed nodes, without a code change per policy.
//! Concrete policies are *domains* that plug a field catalog and condition
//! rules into the generic engine.
//!
//! ## Core Workflow
//!
//! 1.  **Register Domains**: Describe each domain's fields with `FieldDefinition`s and register it in a `DomainRegistry` at startup.
//! 2.  **Author Conditions**: Seed new conditions with `Domain::empty_condition` and carry values across operator changes with `convert_value_on_operator_change`. The resolver always produces a usable value.
//! 3.  **Assemble the Tree**: Build `Node`s and connect them with `create_edge`, or implement `IntoTree` for your own storage format.
//! 4.  **Validate**: Build a `TreeSchema` once and run every edited tree through it before persisting. Violations come back as a list of human-readable messages.
//!
//! Executing a tree against live data is left to each domain's own evaluator,
//! which walks the validated nodes and follows edges by their branch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kettei::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     // 1. Register a domain.
//!     let mut registry = DomainRegistry::new();
//!     registry.register(
//!         Domain::builder("discounts")
//!             .field(FieldDefinition::new("cartTotal", "Cart total", FieldType::Numeric))
//!             .build(),
//!     );
//!     let domain = registry.get("discounts")?;
//!
//!     // 2. Seed a condition and switch it to BETWEEN.
//!     let mut condition = domain.empty_condition("cartTotal").ok_or("unknown field")?;
//!     condition.value = domain.convert_value("cartTotal", Operator::Between, condition.value);
//!     condition.operator = Operator::Between;
//!
//!     // 3. Assemble the tree.
//!     let tree = DecisionTree::new(
//!         vec![
//!             Node::start("start", "Start"),
//!             Node::condition("check", condition),
//!             Node::result("apply", serde_json::json!({ "discount": 10 })),
//!             Node::result("skip", serde_json::json!({ "discount": 0 })),
//!         ],
//!         vec![
//!             create_edge("start", "check", EdgeType::Default),
//!             create_edge("check", "apply", EdgeType::Yes),
//!             create_edge("check", "skip", EdgeType::No),
//!         ],
//!     );
//!
//!     // 4. Validate.
//!     let schema = TreeSchema::builder(DomainNodeShape::new(Arc::clone(&domain)))
//!         .min_result_nodes(2)
//!         .with_rule(ConditionBranchesRule)
//!         .build();
//!     schema.validate(&tree)?;
//!     println!("Tree is valid");
//!     Ok(())
//! }
//! ```

pub mod condition;
pub mod config;
pub mod domain;
pub mod error;
pub mod field;
pub mod operator;
pub mod prelude;
pub mod resolver;
pub mod tree;
pub mod validator;
pub mod value;
