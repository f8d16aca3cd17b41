use crate::operator::{FieldType, Operator};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A named, typed attribute that conditions can test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Restricts the field to a subset of operators. `None` means the type's
    /// default set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operators: Option<Vec<Operator>>,
    /// Domain-specific data the engine carries but never reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl FieldDefinition {
    pub fn new(key: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: String::new(),
            field_type,
            operators: None,
            metadata: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_operators(mut self, operators: impl Into<Vec<Operator>>) -> Self {
        self.operators = Some(operators.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The operators this field allows: its explicit list, or the type defaults.
    pub fn allowed_operators(&self) -> &[Operator] {
        self.operators
            .as_deref()
            .unwrap_or_else(|| self.field_type.default_operators())
    }

    pub fn allows(&self, operator: Operator) -> bool {
        self.allowed_operators().contains(&operator)
    }
}

/// The fields of one domain, keyed by `key` and kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FieldDefinition>", into = "Vec<FieldDefinition>")]
pub struct FieldCatalog {
    fields: Vec<FieldDefinition>,
    index: AHashMap<String, usize>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field. A field with the same key is replaced wholesale and returned.
    pub fn insert(&mut self, field: FieldDefinition) -> Option<FieldDefinition> {
        match self.index.get(&field.key) {
            Some(&pos) => Some(std::mem::replace(&mut self.fields[pos], field)),
            None => {
                self.index.insert(field.key.clone(), self.fields.len());
                self.fields.push(field);
                None
            }
        }
    }

    pub fn with(mut self, field: FieldDefinition) -> Self {
        self.insert(field);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldDefinition> {
        self.index.get(key).map(|&pos| &self.fields[pos])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FieldDefinition> for FieldCatalog {
    fn from_iter<I: IntoIterator<Item = FieldDefinition>>(iter: I) -> Self {
        let mut catalog = FieldCatalog::new();
        for field in iter {
            catalog.insert(field);
        }
        catalog
    }
}

impl From<Vec<FieldDefinition>> for FieldCatalog {
    fn from(fields: Vec<FieldDefinition>) -> Self {
        fields.into_iter().collect()
    }
}

impl From<FieldCatalog> for Vec<FieldDefinition> {
    fn from(catalog: FieldCatalog) -> Self {
        catalog.fields
    }
}

/// A presentation entry for a field picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
    pub description: String,
}

/// Projects a catalog into picker entries, in catalog order.
pub fn field_options_for(fields: &FieldCatalog) -> Vec<FieldOption> {
    fields
        .iter()
        .map(|f| FieldOption {
            value: f.key.clone(),
            label: f.label.clone(),
            description: f.description.clone(),
        })
        .collect()
}
