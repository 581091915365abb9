use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A named slot of state declared when the store is built.
///
/// `persist` and `react_only_on_change` are carried with the declaration
/// but the store does not act on them: writes are never persisted and
/// observers fire on every `set`, changed or not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Unique key within the store.
    pub key: String,
    /// Current value.
    pub value: Value,
    /// Reserved: mark the domain for a persistence engine.
    #[serde(default)]
    pub persist: bool,
    /// Reserved: only notify observers when the value differs.
    #[serde(default)]
    pub react_only_on_change: bool,
}

impl Domain {
    /// Declare a domain with its initial value.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            persist: false,
            react_only_on_change: false,
        }
    }
}

/// Declared domains in declaration order, with a key index.
///
/// The key set is fixed once built; only values change.
#[derive(Debug)]
pub(crate) struct DomainTable {
    domains: Vec<Domain>,
    index: HashMap<String, usize>,
}

impl DomainTable {
    pub(crate) fn new(domains: Vec<Domain>) -> Result<Self, StoreError> {
        let mut index = HashMap::with_capacity(domains.len());
        for (position, domain) in domains.iter().enumerate() {
            if index.insert(domain.key.clone(), position).is_some() {
                return Err(StoreError::DuplicateDomain(domain.key.clone()));
            }
        }
        Ok(Self { domains, index })
    }

    pub(crate) fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub(crate) fn value(&self, position: usize) -> &Value {
        &self.domains[position].value
    }

    pub(crate) fn replace(&mut self, position: usize, value: Value) {
        self.domains[position].value = value;
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.domains.iter().map(|d| d.key.clone()).collect()
    }

    pub(crate) fn domains(&self) -> &[Domain] {
        &self.domains
    }
}
