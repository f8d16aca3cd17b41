use crate::condition::Condition;
use crate::field::FieldCatalog;
use crate::resolver::{InputShape, resolve_input_shape};

/// Checks that a condition is meaningful for a domain's field catalog.
///
/// Returns one human-readable message per problem; an empty list means the
/// condition is acceptable.
pub trait ConditionValidator: Send + Sync {
    fn validate(&self, condition: &Condition, fields: &FieldCatalog) -> Vec<String>;
}

impl<F> ConditionValidator for F
where
    F: Fn(&Condition, &FieldCatalog) -> Vec<String> + Send + Sync,
{
    fn validate(&self, condition: &Condition, fields: &FieldCatalog) -> Vec<String> {
        self(condition, fields)
    }
}

/// The default validator: the field must exist, allow the operator, and the
/// value must have the shape the resolver dictates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeConditionValidator;

impl ConditionValidator for ShapeConditionValidator {
    fn validate(&self, condition: &Condition, fields: &FieldCatalog) -> Vec<String> {
        let Some(field) = fields.get(&condition.field) else {
            return vec![format!("Unknown field '{}'", condition.field)];
        };

        let mut problems = Vec::new();
        if !field.allows(condition.operator) {
            problems.push(format!(
                "Operator '{}' is not allowed for field '{}'",
                condition.operator, condition.field
            ));
        }

        let shape = resolve_input_shape(field.field_type, condition.operator);
        if !shape.accepts(condition.value.as_ref()) {
            let expected = match shape {
                InputShape::None => "no value".to_string(),
                other => format!("a {} value", other),
            };
            problems.push(format!(
                "Field '{}' with operator '{}' expects {}",
                condition.field, condition.operator, expected
            ));
        }
        problems
    }
}
