//! Field-type / operator / value-shape resolution.
//!
//! Every function here is total: unknown fields degrade to a conservative
//! default instead of failing, so an authoring surface always has something to
//! render. Semantic checks belong to the domain's condition validator.

use crate::field::FieldCatalog;
use crate::operator::{FieldType, Operator, ValueShapeClass};
use crate::value::{ConditionValue, DurationUnit, LocationValue, RangeValue, Scalar, is_clock_time};
use serde::{Deserialize, Serialize};
use std::fmt;

mod convert;

pub use convert::*;

/// The abstract input a condition value must take. Doubles as a UI hint and
/// as the contract checked by [`InputShape::accepts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputShape {
    None,
    Number,
    Range,
    Date,
    DateRange,
    Duration,
    Time,
    TimeRange,
    Text,
    Select,
    MultiSelect,
    Location,
    Currency,
}

impl InputShape {
    /// Whether `value` has the structure this shape demands.
    pub fn accepts(&self, value: Option<&ConditionValue>) -> bool {
        use ConditionValue as V;
        match (self, value) {
            (InputShape::None, None) => true,
            (_, None) => false,
            (InputShape::None, Some(_)) => false,
            (InputShape::Number, Some(V::Scalar(Scalar::Number(_)))) => true,
            (InputShape::Currency, Some(V::Scalar(Scalar::Number(_) | Scalar::Null))) => true,
            (InputShape::Range, Some(V::Range(RangeValue::Number { .. }))) => true,
            // `{from, to}` with clock-like bounds decodes as a time range.
            (
                InputShape::DateRange,
                Some(V::Range(RangeValue::Date { .. } | RangeValue::Time { .. })),
            ) => true,
            (InputShape::TimeRange, Some(V::Range(RangeValue::Time { .. }))) => true,
            (InputShape::Date, Some(V::Scalar(Scalar::Text(_) | Scalar::Null))) => true,
            (InputShape::Time, Some(V::Scalar(Scalar::Text(t)))) => is_clock_time(t),
            (InputShape::Duration, Some(V::Duration(_))) => true,
            (InputShape::Text, Some(V::Scalar(Scalar::Text(_)))) => true,
            (InputShape::Select, Some(V::Scalar(_))) => true,
            (InputShape::MultiSelect, Some(V::List(_))) => true,
            (InputShape::Location, Some(V::Location(_))) => true,
            _ => false,
        }
    }
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputShape::None => "none",
            InputShape::Number => "number",
            InputShape::Range => "range",
            InputShape::Date => "date",
            InputShape::DateRange => "dateRange",
            InputShape::Duration => "duration",
            InputShape::Time => "time",
            InputShape::TimeRange => "timeRange",
            InputShape::Text => "text",
            InputShape::Select => "select",
            InputShape::MultiSelect => "multiSelect",
            InputShape::Location => "location",
            InputShape::Currency => "currency",
        };
        f.write_str(name)
    }
}

/// An operator paired with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorOption {
    pub operator: Operator,
    pub label: &'static str,
}

/// The operators a field allows, labelled. Unknown fields allow nothing.
pub fn operators_for(field: &str, fields: &FieldCatalog) -> Vec<OperatorOption> {
    fields
        .get(field)
        .map(|def| {
            def.allowed_operators()
                .iter()
                .map(|&operator| OperatorOption {
                    operator,
                    label: operator.label(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// The value a brand-new condition starts with. `None` means "no value".
pub fn default_value_for(field_type: FieldType, operator: Operator) -> Option<ConditionValue> {
    default_for(Some(field_type), operator)
}

pub(crate) fn default_for(field_type: Option<FieldType>, operator: Operator) -> Option<ConditionValue> {
    match operator.shape_class() {
        ValueShapeClass::None => None,
        ValueShapeClass::Range => Some(ConditionValue::Range(default_range(field_type))),
        ValueShapeClass::Duration => Some(ConditionValue::duration(30.0, DurationUnit::Days)),
        ValueShapeClass::List => Some(ConditionValue::List(Vec::new())),
        ValueShapeClass::Scalar => scalar_default(field_type),
    }
}

fn default_range(field_type: Option<FieldType>) -> RangeValue {
    match field_type {
        Some(FieldType::Date) => RangeValue::Date {
            from: None,
            to: None,
        },
        Some(FieldType::Time) => RangeValue::Time {
            from: "09:00".to_string(),
            to: "18:00".to_string(),
        },
        _ => RangeValue::Number { min: 0.0, max: 100.0 },
    }
}

fn scalar_default(field_type: Option<FieldType>) -> Option<ConditionValue> {
    let Some(field_type) = field_type else {
        return Some(ConditionValue::null());
    };
    match field_type {
        FieldType::Numeric => Some(ConditionValue::number(0.0)),
        FieldType::Boolean => None,
        FieldType::Date | FieldType::Enum | FieldType::Currency => Some(ConditionValue::null()),
        FieldType::Relation => Some(ConditionValue::List(Vec::new())),
        FieldType::Location => Some(ConditionValue::Location(LocationValue::default())),
        FieldType::String => Some(ConditionValue::text("")),
        FieldType::Time => Some(ConditionValue::text("12:00")),
        FieldType::Duration => Some(ConditionValue::duration(1.0, DurationUnit::Days)),
    }
}

/// The input shape a value must take for `operator` on a field of `field_type`.
pub fn resolve_input_shape(field_type: FieldType, operator: Operator) -> InputShape {
    shape_for(Some(field_type), operator)
}

pub(crate) fn shape_for(field_type: Option<FieldType>, operator: Operator) -> InputShape {
    match operator.shape_class() {
        ValueShapeClass::None => InputShape::None,
        ValueShapeClass::Duration => InputShape::Duration,
        ValueShapeClass::Range => match field_type {
            Some(FieldType::Date) => InputShape::DateRange,
            Some(FieldType::Time) => InputShape::TimeRange,
            _ => InputShape::Range,
        },
        ValueShapeClass::List => InputShape::MultiSelect,
        ValueShapeClass::Scalar => match field_type {
            Some(FieldType::Numeric) => InputShape::Number,
            Some(FieldType::Boolean) => InputShape::None,
            Some(FieldType::Enum) => InputShape::Select,
            Some(FieldType::Relation) => InputShape::MultiSelect,
            Some(FieldType::Location) => InputShape::Location,
            Some(FieldType::String) => InputShape::Text,
            Some(FieldType::Time) => InputShape::Time,
            Some(FieldType::Currency) => InputShape::Currency,
            Some(FieldType::Duration) => InputShape::Duration,
            Some(FieldType::Date) => InputShape::Date,
            None => InputShape::Text,
        },
    }
}
