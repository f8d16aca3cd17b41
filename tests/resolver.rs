//! Tests for operator tables, default values, input shapes and value conversion.
mod common;
use common::*;
use kettei::prelude::*;

#[test]
fn test_operator_classes_and_labels() {
    assert_eq!(Operator::IsNull.shape_class(), ValueShapeClass::None);
    assert_eq!(Operator::StartsWith.shape_class(), ValueShapeClass::Scalar);
    assert_eq!(Operator::Between.shape_class(), ValueShapeClass::Range);
    assert_eq!(Operator::NotWithinNext.shape_class(), ValueShapeClass::Duration);
    assert_eq!(Operator::HasNone.shape_class(), ValueShapeClass::List);

    assert_eq!(Operator::Gte.label(), "greater than or equal to");
    assert_eq!(label_for("WITHIN_LAST"), "within the last");
    assert_eq!(label_for("SOUNDS_LIKE"), "SOUNDS_LIKE");
}

#[test]
fn test_operator_wire_identifiers() {
    for &op in Operator::ALL {
        assert_eq!(op.as_str().parse::<Operator>(), Ok(op));
    }
    assert!("SOUNDS_LIKE".parse::<Operator>().is_err());
    assert_eq!(
        serde_json::to_value(Operator::NotIn).unwrap(),
        serde_json::json!("NOT_IN")
    );
}

#[test]
fn test_operators_for_uses_type_defaults() {
    let fields = payment_fields();
    let options = operators_for("isVip", &fields);
    let ops: Vec<Operator> = options.iter().map(|o| o.operator).collect();
    assert_eq!(ops, vec![Operator::IsTrue, Operator::IsFalse]);
    assert_eq!(options[0].label, "is true");
}

#[test]
fn test_operators_for_respects_explicit_list() {
    let fields = payment_fields();
    let ops: Vec<Operator> = operators_for("tags", &fields)
        .into_iter()
        .map(|o| o.operator)
        .collect();
    assert_eq!(ops, vec![Operator::In, Operator::Eq, Operator::HasAny]);
}

#[test]
fn test_operators_for_unknown_field_is_empty() {
    assert!(operators_for("missing", &payment_fields()).is_empty());
}

#[test]
fn test_default_values_by_class() {
    assert_eq!(default_value_for(FieldType::Numeric, Operator::IsNull), None);
    assert_eq!(
        default_value_for(FieldType::Date, Operator::Between),
        Some(ConditionValue::Range(RangeValue::Date { from: None, to: None }))
    );
    assert_eq!(
        default_value_for(FieldType::Time, Operator::Between),
        Some(ConditionValue::Range(RangeValue::Time {
            from: "09:00".to_string(),
            to: "18:00".to_string()
        }))
    );
    assert_eq!(
        default_value_for(FieldType::Currency, Operator::Between),
        Some(ConditionValue::number_range(0.0, 100.0))
    );
    assert_eq!(
        default_value_for(FieldType::Date, Operator::WithinNext),
        Some(ConditionValue::duration(30.0, DurationUnit::Days))
    );
    assert_eq!(
        default_value_for(FieldType::Enum, Operator::In),
        Some(ConditionValue::List(vec![]))
    );
}

#[test]
fn test_default_values_by_type() {
    use FieldType::*;
    let eq = Operator::Eq;
    assert_eq!(default_value_for(Numeric, eq), Some(ConditionValue::number(0.0)));
    assert_eq!(default_value_for(Date, Operator::After), Some(ConditionValue::null()));
    assert_eq!(default_value_for(Boolean, eq), None);
    assert_eq!(default_value_for(Enum, eq), Some(ConditionValue::null()));
    assert_eq!(default_value_for(Relation, eq), Some(ConditionValue::List(vec![])));
    assert_eq!(
        default_value_for(Location, eq),
        Some(ConditionValue::Location(LocationValue::default()))
    );
    assert_eq!(default_value_for(String, eq), Some(ConditionValue::text("")));
    assert_eq!(default_value_for(Time, eq), Some(ConditionValue::text("12:00")));
    assert_eq!(default_value_for(Currency, eq), Some(ConditionValue::null()));
    assert_eq!(
        default_value_for(Duration, eq),
        Some(ConditionValue::duration(1.0, DurationUnit::Days))
    );
}

#[test]
fn test_resolve_input_shape() {
    use FieldType::*;
    assert_eq!(resolve_input_shape(Date, Operator::WithinLast), InputShape::Duration);
    assert_eq!(resolve_input_shape(Date, Operator::Between), InputShape::DateRange);
    assert_eq!(resolve_input_shape(Time, Operator::Between), InputShape::TimeRange);
    assert_eq!(resolve_input_shape(Numeric, Operator::Between), InputShape::Range);
    assert_eq!(resolve_input_shape(Enum, Operator::In), InputShape::MultiSelect);
    assert_eq!(resolve_input_shape(Enum, Operator::Eq), InputShape::Select);
    assert_eq!(resolve_input_shape(Boolean, Operator::Eq), InputShape::None);
    assert_eq!(resolve_input_shape(Relation, Operator::Eq), InputShape::MultiSelect);
    assert_eq!(resolve_input_shape(Location, Operator::Eq), InputShape::Location);
    assert_eq!(resolve_input_shape(String, Operator::Contains), InputShape::Text);
    assert_eq!(resolve_input_shape(Time, Operator::After), InputShape::Time);
    assert_eq!(resolve_input_shape(Currency, Operator::Gt), InputShape::Currency);
    assert_eq!(resolve_input_shape(Duration, Operator::Lt), InputShape::Duration);
    assert_eq!(resolve_input_shape(Numeric, Operator::IsNotNull), InputShape::None);
}

#[test]
fn test_default_value_always_matches_input_shape() {
    for &field_type in FieldType::ALL {
        for &op in Operator::ALL {
            let shape = resolve_input_shape(field_type, op);
            let value = default_value_for(field_type, op);
            assert!(
                shape.accepts(value.as_ref()),
                "{} {}: shape {} rejects default {:?}",
                field_type,
                op,
                shape,
                value
            );
        }
    }
}

#[test]
fn test_converting_to_current_operator_is_a_no_op() {
    for &field_type in FieldType::ALL {
        for &op in Operator::ALL {
            let value = default_value_for(field_type, op);
            assert_eq!(
                convert_value_for_type(field_type, op, value.clone()),
                value,
                "{} {}",
                field_type,
                op
            );
        }
    }

    let samples = [
        (FieldType::Numeric, Operator::Gt, ConditionValue::number(42.5)),
        (FieldType::String, Operator::Contains, ConditionValue::text("gift")),
        (FieldType::Enum, Operator::In, ConditionValue::list(["visa", "amex"])),
        (FieldType::Time, Operator::Before, ConditionValue::text("07:45")),
        (FieldType::Duration, Operator::Gte, ConditionValue::duration(2.0, DurationUnit::Weeks)),
        (FieldType::Numeric, Operator::Between, ConditionValue::number_range(5.0, 9.0)),
    ];
    for (field_type, op, value) in samples {
        assert_eq!(
            convert_value_for_type(field_type, op, Some(value.clone())),
            Some(value)
        );
    }
}

#[test]
fn test_no_value_operators_discard_values() {
    let values = [
        None,
        Some(ConditionValue::number(3.0)),
        Some(ConditionValue::list(["a"])),
        Some(ConditionValue::number_range(1.0, 2.0)),
        Some(ConditionValue::duration(5.0, DurationUnit::Hours)),
    ];
    let no_value_ops = Operator::ALL
        .iter()
        .filter(|op| op.shape_class() == ValueShapeClass::None);
    for &op in no_value_ops {
        for value in &values {
            for &field_type in FieldType::ALL {
                assert_eq!(convert_value_for_type(field_type, op, value.clone()), None);
            }
        }
    }
}

#[test]
fn test_scalar_survives_list_round_trip() {
    let fields = payment_fields();
    let cases = [
        ("price", ConditionValue::number(12.0)),
        ("note", ConditionValue::text("express")),
        ("method", ConditionValue::text("visa")),
    ];
    for (field, original) in cases {
        let listed =
            convert_value_on_operator_change(field, Operator::In, Some(original.clone()), &fields);
        assert!(matches!(listed, Some(ConditionValue::List(ref items)) if items.len() == 1));
        let back = convert_value_on_operator_change(field, Operator::Eq, listed, &fields);
        assert_eq!(back, Some(original));
    }
}

#[test]
fn test_numeric_field_to_between_seeds_range() {
    let fields = payment_fields();
    let seed = empty_condition_for("price", &fields).unwrap();
    assert_eq!(seed.operator, Operator::Eq);
    assert_eq!(seed.value, Some(ConditionValue::number(0.0)));

    let converted = convert_value_on_operator_change("price", Operator::Between, seed.value, &fields);
    assert_eq!(converted, Some(ConditionValue::number_range(0.0, 100.0)));

    let from_text = convert_value_on_operator_change(
        "price",
        Operator::Between,
        Some(ConditionValue::text("40")),
        &fields,
    );
    assert_eq!(from_text, Some(ConditionValue::number_range(40.0, 140.0)));
}

#[test]
fn test_date_field_to_within_last_becomes_duration() {
    let fields = payment_fields();
    let converted = convert_value_on_operator_change(
        "createdAt",
        Operator::WithinLast,
        Some(ConditionValue::text("2024-05-01")),
        &fields,
    );
    assert_eq!(converted, Some(ConditionValue::duration(30.0, DurationUnit::Days)));

    let kept = convert_value_on_operator_change(
        "createdAt",
        Operator::NotWithinNext,
        Some(ConditionValue::duration(3.0, DurationUnit::Months)),
        &fields,
    );
    assert_eq!(kept, Some(ConditionValue::duration(3.0, DurationUnit::Months)));
}

#[test]
fn test_relation_list_to_equals_takes_first_element() {
    let fields = payment_fields();
    let converted = convert_value_on_operator_change(
        "tags",
        Operator::Eq,
        Some(ConditionValue::list(["a", "b"])),
        &fields,
    );
    assert_eq!(converted, Some(ConditionValue::text("a")));
}

#[test]
fn test_date_field_to_between_always_resets() {
    let fields = payment_fields();
    let converted = convert_value_on_operator_change(
        "createdAt",
        Operator::Between,
        Some(ConditionValue::text("2024-05-01")),
        &fields,
    );
    assert_eq!(
        converted,
        Some(ConditionValue::Range(RangeValue::Date { from: None, to: None }))
    );
}

#[test]
fn test_time_field_to_between_uses_business_hours() {
    let fields = payment_fields();
    let converted = convert_value_on_operator_change(
        "cutoff",
        Operator::Between,
        Some(ConditionValue::text("12:00")),
        &fields,
    );
    assert_eq!(
        converted,
        Some(ConditionValue::Range(RangeValue::Time {
            from: "09:00".to_string(),
            to: "18:00".to_string()
        }))
    );
}

#[test]
fn test_unwrapping_to_scalar() {
    let fields = payment_fields();
    let from_range = convert_value_on_operator_change(
        "price",
        Operator::Lt,
        Some(ConditionValue::number_range(15.0, 60.0)),
        &fields,
    );
    assert_eq!(from_range, Some(ConditionValue::number(15.0)));

    let from_duration = convert_value_on_operator_change(
        "price",
        Operator::Eq,
        Some(ConditionValue::duration(7.0, DurationUnit::Days)),
        &fields,
    );
    assert_eq!(from_duration, Some(ConditionValue::number(7.0)));

    let from_empty_list = convert_value_on_operator_change(
        "price",
        Operator::Eq,
        Some(ConditionValue::List(vec![])),
        &fields,
    );
    assert_eq!(from_empty_list, Some(ConditionValue::number(0.0)));

    let from_nothing = convert_value_on_operator_change("note", Operator::StartsWith, None, &fields);
    assert_eq!(from_nothing, Some(ConditionValue::text("")));
}

#[test]
fn test_list_conversion_skips_blank_scalars() {
    let fields = payment_fields();
    for blank in [ConditionValue::text(""), ConditionValue::null()] {
        let converted =
            convert_value_on_operator_change("method", Operator::NotIn, Some(blank), &fields);
        assert_eq!(converted, Some(ConditionValue::List(vec![])));
    }
}

#[test]
fn test_unknown_field_degrades_to_defaults() {
    let fields = payment_fields();
    assert_eq!(
        convert_value_on_operator_change("missing", Operator::Eq, None, &fields),
        Some(ConditionValue::null())
    );
    assert_eq!(
        convert_value_on_operator_change("missing", Operator::Between, None, &fields),
        Some(ConditionValue::number_range(0.0, 100.0))
    );
    assert_eq!(
        convert_value_on_operator_change("missing", Operator::Exists, None, &fields),
        None
    );
}

#[test]
fn test_non_finite_text_seeds_range_from_zero() {
    for text in ["NaN", "inf", "-infinity", "Infinity"] {
        let converted =
            convert_value_for_type(FieldType::Numeric, Operator::Between, Some(ConditionValue::text(text)));
        assert_eq!(converted, Some(ConditionValue::number_range(0.0, 100.0)), "{}", text);
    }
    assert_eq!(Scalar::text("NaN").as_number(), None);
    assert_eq!(Scalar::Number(f64::INFINITY).as_number(), None);
    assert_eq!(Scalar::text(" 42 ").as_number(), Some(42.0));
}
