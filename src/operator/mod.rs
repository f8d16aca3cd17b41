use crate::error::UnknownOperator;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

mod field_type;

pub use field_type::FieldType;

/// The five structural shapes a condition value can take.
///
/// Every operator belongs to exactly one class, and the class alone decides
/// how defaults are synthesized and how values are converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShapeClass {
    None,
    Scalar,
    Range,
    Duration,
    List,
}

/// Master macro defining the operator enumeration together with its wire
/// identifier, human label and value-shape class.
macro_rules! define_operators {
    ( $( ($variant:ident, $wire:literal, $label:literal, $class:ident) ),* $(,)? ) => {
        /// A comparison or test kind applied to a field.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operator {
            $( $variant, )*
        }

        impl Operator {
            /// Every operator, in declaration order.
            pub const ALL: &'static [Operator] = &[ $( Operator::$variant, )* ];

            /// The identifier used on the wire, e.g. `"NOT_WITHIN_LAST"`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Operator::$variant => $wire, )*
                }
            }

            /// The fixed human-readable label.
            pub fn label(&self) -> &'static str {
                match self {
                    $( Operator::$variant => $label, )*
                }
            }

            pub fn shape_class(&self) -> ValueShapeClass {
                match self {
                    $( Operator::$variant => ValueShapeClass::$class, )*
                }
            }

            /// Looks up an operator by its wire identifier.
            pub fn from_wire(raw: &str) -> Option<Operator> {
                match raw {
                    $( $wire => Some(Operator::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

define_operators! {
    // No value
    (IsNull, "IS_NULL", "is empty", None),
    (IsNotNull, "IS_NOT_NULL", "is not empty", None),
    (IsTrue, "IS_TRUE", "is true", None),
    (IsFalse, "IS_FALSE", "is false", None),
    (IsEmpty, "IS_EMPTY", "has no items", None),
    (IsNotEmpty, "IS_NOT_EMPTY", "has items", None),
    (Exists, "EXISTS", "exists", None),
    (NotExists, "NOT_EXISTS", "does not exist", None),

    // Scalar
    (Eq, "EQ", "equals", Scalar),
    (Neq, "NEQ", "does not equal", Scalar),
    (Gt, "GT", "greater than", Scalar),
    (Gte, "GTE", "greater than or equal to", Scalar),
    (Lt, "LT", "less than", Scalar),
    (Lte, "LTE", "less than or equal to", Scalar),
    (Contains, "CONTAINS", "contains", Scalar),
    (NotContains, "NOT_CONTAINS", "does not contain", Scalar),
    (StartsWith, "STARTS_WITH", "starts with", Scalar),
    (EndsWith, "ENDS_WITH", "ends with", Scalar),
    (After, "AFTER", "after", Scalar),
    (Before, "BEFORE", "before", Scalar),
    (OnDate, "ON_DATE", "on", Scalar),

    // Range
    (Between, "BETWEEN", "between", Range),

    // Duration
    (WithinLast, "WITHIN_LAST", "within the last", Duration),
    (WithinNext, "WITHIN_NEXT", "within the next", Duration),
    (NotWithinLast, "NOT_WITHIN_LAST", "not within the last", Duration),
    (NotWithinNext, "NOT_WITHIN_NEXT", "not within the next", Duration),

    // List
    (In, "IN", "is one of", List),
    (NotIn, "NOT_IN", "is not one of", List),
    (HasAny, "HAS_ANY", "has any of", List),
    (HasAll, "HAS_ALL", "has all of", List),
    (HasNone, "HAS_NONE", "has none of", List),
}

/// Returns the label for a raw operator identifier, or the identifier itself
/// when it does not name a known operator.
pub fn label_for(raw: &str) -> &str {
    Operator::from_wire(raw).map_or(raw, |op| op.label())
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_wire(s).ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
