use super::Domain;
use crate::error::LoadError;
use crate::field::FieldCatalog;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A domain declared as data: a name and its field catalog.
///
/// Domains built from a definition use the default shape validator and
/// empty-condition factory. Domains that need custom rules are built in code
/// with [`Domain::builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainDefinition {
    pub name: String,
    pub fields: FieldCatalog,
}

impl DomainDefinition {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn into_domain(self) -> Domain {
        Domain::builder(self.name).fields(self.fields).build()
    }
}
