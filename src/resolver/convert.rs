use super::{default_for, shape_for};
use crate::field::FieldCatalog;
use crate::operator::{FieldType, Operator, ValueShapeClass};
use crate::value::{ConditionValue, DurationUnit, RangeValue, Scalar};
use tracing::trace;

/// Carries a condition value across an operator change with as little loss as
/// possible. Unknown fields are treated as untyped.
pub fn convert_value_on_operator_change(
    field: &str,
    new_operator: Operator,
    current: Option<ConditionValue>,
    fields: &FieldCatalog,
) -> Option<ConditionValue> {
    let field_type = fields.get(field).map(|def| def.field_type);
    convert(field_type, new_operator, current)
}

/// Same as [`convert_value_on_operator_change`], keyed directly by type.
pub fn convert_value_for_type(
    field_type: FieldType,
    new_operator: Operator,
    current: Option<ConditionValue>,
) -> Option<ConditionValue> {
    convert(Some(field_type), new_operator, current)
}

fn convert(
    field_type: Option<FieldType>,
    operator: Operator,
    current: Option<ConditionValue>,
) -> Option<ConditionValue> {
    let class = operator.shape_class();
    let converted = match class {
        ValueShapeClass::None => None,
        ValueShapeClass::Duration => match current {
            Some(value @ ConditionValue::Duration(_)) => Some(value),
            _ => Some(ConditionValue::duration(30.0, DurationUnit::Days)),
        },
        ValueShapeClass::Range => Some(ConditionValue::Range(to_range(field_type, current))),
        ValueShapeClass::List => Some(ConditionValue::List(to_list(current))),
        ValueShapeClass::Scalar => to_scalar(field_type, operator, current),
    };
    trace!(
        operator = operator.as_str(),
        ?class,
        converted = ?converted,
        "converted condition value"
    );
    converted
}

fn to_range(field_type: Option<FieldType>, current: Option<ConditionValue>) -> RangeValue {
    match (field_type, current) {
        // A scalar date cannot be spread into a range meaningfully.
        (Some(FieldType::Date), _) => RangeValue::Date {
            from: None,
            to: None,
        },
        (Some(FieldType::Time), Some(ConditionValue::Range(range @ RangeValue::Time { .. }))) => {
            range
        }
        (Some(FieldType::Time), _) => RangeValue::Time {
            from: "09:00".to_string(),
            to: "18:00".to_string(),
        },
        (_, Some(ConditionValue::Range(range @ RangeValue::Number { .. }))) => range,
        (_, current) => {
            let seed = numeric_or_zero(current.as_ref());
            RangeValue::Number {
                min: seed,
                max: seed + 100.0,
            }
        }
    }
}

fn to_list(current: Option<ConditionValue>) -> Vec<Scalar> {
    match current {
        Some(ConditionValue::List(items)) => items,
        Some(ConditionValue::Scalar(s)) if !s.is_blank() => vec![s],
        _ => Vec::new(),
    }
}

fn to_scalar(
    field_type: Option<FieldType>,
    operator: Operator,
    current: Option<ConditionValue>,
) -> Option<ConditionValue> {
    let fallback = || default_for(field_type, operator);
    match current {
        Some(ConditionValue::List(items)) => items
            .into_iter()
            .next()
            .map(ConditionValue::Scalar)
            .or_else(fallback),
        Some(value) if shape_for(field_type, operator).accepts(Some(&value)) => Some(value),
        Some(ConditionValue::Range(RangeValue::Number { min, .. })) => {
            Some(ConditionValue::number(min))
        }
        Some(ConditionValue::Range(RangeValue::Date { from, .. })) => {
            from.map(ConditionValue::text).or_else(fallback)
        }
        Some(ConditionValue::Range(RangeValue::Time { from, .. })) => {
            Some(ConditionValue::text(from))
        }
        Some(ConditionValue::Duration(d)) => Some(ConditionValue::number(d.amount)),
        Some(value) => Some(value),
        None => fallback(),
    }
}

fn numeric_or_zero(value: Option<&ConditionValue>) -> f64 {
    value
        .and_then(ConditionValue::as_scalar)
        .and_then(Scalar::as_number)
        .unwrap_or(0.0)
}
