use crate::condition::Condition;
use crate::field::{FieldCatalog, FieldDefinition, FieldOption, field_options_for};
use crate::operator::Operator;
use crate::resolver::{OperatorOption, convert_value_on_operator_change, default_value_for, operators_for};
use crate::value::ConditionValue;
use std::fmt;
use std::sync::Arc;

mod definition;
mod registry;
mod validator;

pub use definition::DomainDefinition;
pub use registry::DomainRegistry;
pub use validator::{ConditionValidator, ShapeConditionValidator};

/// Builds the seed condition for a field that an author has just added.
pub type EmptyConditionFactory = Arc<dyn Fn(&str, &FieldCatalog) -> Option<Condition> + Send + Sync>;

/// Checks a domain's result payload. Returns one message per problem.
pub type ResultValidator = Arc<dyn Fn(&serde_json::Value) -> Vec<String> + Send + Sync>;

/// Seeds a new condition on `field`: its first allowed operator and that
/// operator's default value. Unknown fields yield `None`; a field whose
/// explicit operator list is empty falls back to `EQ`.
pub fn empty_condition_for(field: &str, fields: &FieldCatalog) -> Option<Condition> {
    let def = fields.get(field)?;
    let operator = def
        .allowed_operators()
        .first()
        .copied()
        .unwrap_or(Operator::Eq);
    Some(Condition::new(
        field,
        operator,
        default_value_for(def.field_type, operator),
    ))
}

/// A named business area that plugs its fields and condition rules into the
/// engine.
pub struct Domain {
    name: String,
    fields: FieldCatalog,
    condition_validator: Arc<dyn ConditionValidator>,
    empty_condition_factory: EmptyConditionFactory,
    result_validator: Option<ResultValidator>,
}

impl Domain {
    pub fn builder(name: impl Into<String>) -> DomainBuilder {
        DomainBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &FieldCatalog {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.get(key)
    }

    pub fn validate_condition(&self, condition: &Condition) -> Vec<String> {
        self.condition_validator.validate(condition, &self.fields)
    }

    pub fn validate_result(&self, payload: &serde_json::Value) -> Vec<String> {
        self.result_validator
            .as_ref()
            .map(|validate| validate(payload))
            .unwrap_or_default()
    }

    pub fn empty_condition(&self, field: &str) -> Option<Condition> {
        (self.empty_condition_factory)(field, &self.fields)
    }

    pub fn operators_for(&self, field: &str) -> Vec<OperatorOption> {
        operators_for(field, &self.fields)
    }

    pub fn field_options(&self) -> Vec<FieldOption> {
        field_options_for(&self.fields)
    }

    pub fn convert_value(
        &self,
        field: &str,
        new_operator: Operator,
        current: Option<ConditionValue>,
    ) -> Option<ConditionValue> {
        convert_value_on_operator_change(field, new_operator, current, &self.fields)
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("name", &self.name)
            .field("fields", &self.fields.len())
            .field("result_validator", &self.result_validator.is_some())
            .finish()
    }
}

pub struct DomainBuilder {
    name: String,
    fields: FieldCatalog,
    condition_validator: Arc<dyn ConditionValidator>,
    empty_condition_factory: EmptyConditionFactory,
    result_validator: Option<ResultValidator>,
}

impl DomainBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: FieldCatalog::new(),
            condition_validator: Arc::new(ShapeConditionValidator),
            empty_condition_factory: Arc::new(empty_condition_for),
            result_validator: None,
        }
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.insert(field);
        self
    }

    pub fn fields(mut self, fields: FieldCatalog) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_condition_validator(mut self, validator: impl ConditionValidator + 'static) -> Self {
        self.condition_validator = Arc::new(validator);
        self
    }

    pub fn with_empty_condition_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str, &FieldCatalog) -> Option<Condition> + Send + Sync + 'static,
    {
        self.empty_condition_factory = Arc::new(factory);
        self
    }

    pub fn with_result_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&serde_json::Value) -> Vec<String> + Send + Sync + 'static,
    {
        self.result_validator = Some(Arc::new(validator));
        self
    }

    pub fn build(self) -> Domain {
        Domain {
            name: self.name,
            fields: self.fields,
            condition_validator: self.condition_validator,
            empty_condition_factory: self.empty_condition_factory,
            result_validator: self.result_validator,
        }
    }
}
