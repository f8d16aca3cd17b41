//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! kettei crate. Import it to get the core functionality without importing each
//! type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use kettei::prelude::*;
//! use std::sync::Arc;
//!
//! # fn run_example() -> Result<()> {
//! let domain = DomainDefinition::from_file("path/to/domain.json")?.into_domain();
//! let tree = DecisionTree::from_file("path/to/tree.json")?;
//!
//! let schema = TreeSchema::builder(DomainNodeShape::new(Arc::new(domain))).build();
//! match schema.validate(&tree) {
//!     Ok(()) => println!("valid"),
//!     Err(e) => println!("{}", e),
//! }
//! # Ok(())
//! # }
//! ```

// Operators, fields and values
pub use crate::field::{FieldCatalog, FieldDefinition, FieldOption, field_options_for};
pub use crate::operator::{FieldType, Operator, ValueShapeClass, label_for};
pub use crate::value::{ConditionValue, DurationUnit, DurationValue, LocationValue, RangeValue, Scalar};

// Resolution
pub use crate::resolver::{
    InputShape, OperatorOption, convert_value_for_type, convert_value_on_operator_change,
    default_value_for, operators_for, resolve_input_shape,
};

// Conditions and domains
pub use crate::condition::{Condition, ConditionGroup, LogicalOperator};
pub use crate::domain::{
    ConditionValidator, Domain, DomainDefinition, DomainRegistry, ShapeConditionValidator,
    empty_condition_for,
};

// Tree model
pub use crate::tree::{
    DecisionTree, Edge, EdgeType, IntoTree, Node, NodeKind, Position, create_edge, create_node_id,
};

// Validation
pub use crate::config::EngineConfig;
pub use crate::validator::{
    AcyclicRule, AnyNodeShape, ConditionBranchesRule, DomainNodeShape, FnRule, NodeShape,
    ReportMode, TreeRule, TreeSchema, Violation,
};

// Error types
pub use crate::error::{LoadError, RegistryError, TreeConversionError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
