use super::Domain;
use crate::error::RegistryError;
use ahash::AHashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// The table of known domains.
///
/// Populate it once at startup, then share it read-only (e.g. behind an
/// `Arc`). Registering a name that already exists replaces the previous entry
/// in place.
#[derive(Debug, Default)]
pub struct DomainRegistry {
    domains: Vec<Arc<Domain>>,
    index: AHashMap<String, usize>,
}

impl DomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `domain`, returning the entry it replaced, if any.
    pub fn register(&mut self, domain: Domain) -> Option<Arc<Domain>> {
        let domain = Arc::new(domain);
        match self.index.get(domain.name()) {
            Some(&pos) => {
                warn!(domain = domain.name(), "replacing registered domain");
                Some(std::mem::replace(&mut self.domains[pos], domain))
            }
            None => {
                info!(
                    domain = domain.name(),
                    fields = domain.fields().len(),
                    "registered domain"
                );
                self.index.insert(domain.name().to_string(), self.domains.len());
                self.domains.push(domain);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Result<Arc<Domain>, RegistryError> {
        self.index
            .get(name)
            .map(|&pos| Arc::clone(&self.domains[pos]))
            .ok_or_else(|| RegistryError::DomainNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn list(&self) -> Vec<String> {
        self.domains.iter().map(|d| d.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
