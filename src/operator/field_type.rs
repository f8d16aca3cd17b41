use super::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic type of a field, which selects its default operator set and
/// the concrete shape of range and scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Numeric,
    String,
    Boolean,
    Date,
    Time,
    Duration,
    Currency,
    Enum,
    Relation,
    Location,
}

impl FieldType {
    pub const ALL: &'static [FieldType] = &[
        FieldType::Numeric,
        FieldType::String,
        FieldType::Boolean,
        FieldType::Date,
        FieldType::Time,
        FieldType::Duration,
        FieldType::Currency,
        FieldType::Enum,
        FieldType::Relation,
        FieldType::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Numeric => "NUMERIC",
            FieldType::String => "STRING",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Date => "DATE",
            FieldType::Time => "TIME",
            FieldType::Duration => "DURATION",
            FieldType::Currency => "CURRENCY",
            FieldType::Enum => "ENUM",
            FieldType::Relation => "RELATION",
            FieldType::Location => "LOCATION",
        }
    }

    /// The operators a field of this type allows when it declares none itself.
    /// The first entry seeds new conditions.
    pub fn default_operators(&self) -> &'static [Operator] {
        use Operator::*;
        match self {
            FieldType::Numeric => &[
                Eq, Neq, Gt, Gte, Lt, Lte, Between, In, NotIn, IsNull, IsNotNull,
            ],
            FieldType::String => &[
                Eq,
                Neq,
                Contains,
                NotContains,
                StartsWith,
                EndsWith,
                In,
                NotIn,
                IsEmpty,
                IsNotEmpty,
            ],
            FieldType::Boolean => &[IsTrue, IsFalse],
            FieldType::Date => &[
                After,
                Before,
                OnDate,
                Between,
                WithinLast,
                WithinNext,
                NotWithinLast,
                NotWithinNext,
                IsNull,
                IsNotNull,
            ],
            FieldType::Time => &[Eq, After, Before, Between],
            FieldType::Duration => &[Eq, Gt, Gte, Lt, Lte],
            FieldType::Currency => &[Eq, Neq, Gt, Gte, Lt, Lte, Between],
            FieldType::Enum => &[Eq, Neq, In, NotIn],
            FieldType::Relation => &[HasAny, HasAll, HasNone, IsEmpty, IsNotEmpty],
            FieldType::Location => &[Eq, Neq, Exists, NotExists],
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
