//! Declarative store construction.

use crate::error::StoreError;
use crate::middleware::Middleware;
use crate::store::{Domain, Store};
use serde::Deserialize;

/// Everything needed to build a [`Store`]: the domains, and optionally a
/// middleware chain.
///
/// Domains can be declared in code or loaded from JSON:
///
/// ```
/// use observact::{logger_middleware, StoreConfig};
///
/// let store = StoreConfig::from_json(
///     r#"{ "domains": [ { "key": "theme", "value": "light" } ] }"#,
/// )
/// .unwrap()
/// .middleware(logger_middleware())
/// .build()
/// .unwrap();
///
/// assert_eq!(store.get("theme").unwrap(), "light");
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct StoreConfig {
    /// Domains in declaration order.
    pub domains: Vec<Domain>,
    /// Middlewares in invocation order. Not part of the JSON form.
    #[serde(skip)]
    pub middlewares: Vec<Middleware>,
}

impl StoreConfig {
    /// An empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse domain declarations from a JSON document of the form
    /// `{ "domains": [ { "key": ..., "value": ... } ] }`.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Declare another domain.
    pub fn domain(mut self, domain: Domain) -> Self {
        self.domains.push(domain);
        self
    }

    /// Append a middleware to the chain.
    pub fn middleware(mut self, middleware: Middleware) -> Self {
        self.middlewares.push(middleware);
        self
    }

    /// Build the store.
    pub fn build(self) -> Result<Store, StoreError> {
        Store::with_middlewares(self.domains, self.middlewares)
    }
}

impl From<Vec<Domain>> for StoreConfig {
    fn from(domains: Vec<Domain>) -> Self {
        Self {
            domains,
            middlewares: Vec::new(),
        }
    }
}

/// Create a store from a configuration.
pub fn create_store(config: StoreConfig) -> Result<Store, StoreError> {
    config.build()
}
