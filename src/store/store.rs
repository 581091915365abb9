use super::domain::{Domain, DomainTable};
use super::observer::ObserverRegistry;
use crate::error::{HandlerError, StoreError};
use crate::middleware::{Middleware, MiddlewareContext, Mutation};
use parking_lot::ReentrantMutex;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

struct StoreState {
    domains: DomainTable,
    observers: ObserverRegistry,
}

/// A thread-safe store of named domains with per-domain observers.
///
/// The set of domains and the middleware chain are fixed at construction;
/// only domain values change, through [`set`](Store::set). Every write runs
/// the middlewares in registration order, replaces the value, then calls the
/// observers of that domain in registration order, all before returning.
///
/// Unknown keys are rejected with [`StoreError::DomainNotFound`] by every
/// keyed operation.
///
/// Each call holds a re-entrant lock for its whole duration. Writes from
/// other threads wait; observers and middlewares may call back into the
/// store on the same thread. A handler that always writes back to the domain
/// it observes recurses without bound, and avoiding that is up to the caller.
///
/// Cloning a `Store` yields another handle to the same state.
pub struct Store {
    state: Arc<ReentrantMutex<RefCell<StoreState>>>,
    middlewares: Arc<[Middleware]>,
}

impl Store {
    /// Create a store with the given domains and no middleware.
    pub fn new(domains: Vec<Domain>) -> Result<Self, StoreError> {
        Self::with_middlewares(domains, Vec::new())
    }

    /// Create a store with the given domains and middleware chain.
    ///
    /// Fails with [`StoreError::DuplicateDomain`] if a key is declared twice.
    pub fn with_middlewares(
        domains: Vec<Domain>,
        middlewares: Vec<Middleware>,
    ) -> Result<Self, StoreError> {
        let domains = DomainTable::new(domains)?;
        Ok(Self {
            state: Arc::new(ReentrantMutex::new(RefCell::new(StoreState {
                domains,
                observers: ObserverRegistry::default(),
            }))),
            middlewares: middlewares.into(),
        })
    }

    /// Get a clone of the current value of a domain.
    pub fn get(&self, key: &str) -> Result<Value, StoreError> {
        self.read(key, Value::clone)
    }

    /// Read a domain value without cloning it.
    ///
    /// # Panics
    ///
    /// Panics if `f` writes to this store or registers observers on it.
    pub fn read<F, R>(&self, key: &str, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Value) -> R,
    {
        let guard = self.state.lock();
        let state = guard.borrow();
        let position = Self::locate(&state, key)?;
        Ok(f(state.domains.value(position)))
    }

    /// Set a new value for a domain and notify its observers.
    ///
    /// Middlewares run first and still see the old value through the store.
    /// If one fails, the write is abandoned and the error is returned. The
    /// value is then replaced unconditionally and observers are called with
    /// it; the first failing observer stops notification and its error is
    /// returned, with the new value already in place.
    ///
    /// Observers registered or cleared while notification is in progress
    /// take effect from the next write.
    pub fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let guard = self.state.lock();
        let position = Self::locate(&guard.borrow(), key)?;

        let mutation = Mutation { key, value: &value };
        for middleware in self.middlewares.iter() {
            let context = MiddlewareContext {
                store: self,
                incoming_mutation: mutation,
            };
            middleware
                .exec(&context)
                .map_err(|source| StoreError::Middleware {
                    name: middleware.name().to_string(),
                    source,
                })?;
        }

        let handlers = {
            let mut state = guard.borrow_mut();
            state.domains.replace(position, value.clone());
            state.observers.handlers_for(key)
        };
        debug!(
            key,
            middlewares = self.middlewares.len(),
            observers = handlers.len(),
            "domain updated"
        );

        for handler in handlers {
            handler(&value).map_err(|source| StoreError::Observer {
                key: key.to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Update a domain value using a function.
    ///
    /// The closure works on a copy of the current value, which is then
    /// written back with [`set`](Store::set), middlewares and observers
    /// included.
    pub fn update<F>(&self, key: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Value),
    {
        let _guard = self.state.lock();
        let mut value = self.get(key)?;
        f(&mut value);
        self.set(key, value)
    }

    /// Register an observer on a domain.
    ///
    /// The observer is called on every subsequent `set` of that domain with
    /// the new value. It is not called with the current value on
    /// registration.
    pub fn observe<F>(&self, key: &str, handler: F) -> Result<(), StoreError>
    where
        F: Fn(&Value) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        Self::locate(&state, key)?;
        state.observers.push(key, Arc::new(handler));
        trace!(key, observers = state.observers.len(), "observer registered");
        Ok(())
    }

    /// Remove every registered observer. Middlewares and values are kept.
    pub fn clear_observers(&self) {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        trace!(removed = state.observers.len(), "observers cleared");
        state.observers.clear();
    }

    /// Declared domain keys in declaration order.
    pub fn domain_keys(&self) -> Vec<String> {
        self.state.lock().borrow().domains.keys()
    }

    /// Whether `key` was declared. Never fails.
    pub fn contains_domain(&self, key: &str) -> bool {
        self.state.lock().borrow().domains.position(key).is_some()
    }

    /// Current domains, values and flags, in declaration order.
    ///
    /// Pass the result to [`StoreConfig::from`](crate::StoreConfig) to build
    /// a new store starting from this state.
    pub fn snapshot(&self) -> Vec<Domain> {
        self.state.lock().borrow().domains.domains().to_vec()
    }

    /// Number of registered observers across all domains.
    pub fn observer_count(&self) -> usize {
        self.state.lock().borrow().observers.len()
    }

    /// Middleware chain in invocation order.
    pub fn middlewares(&self) -> &[Middleware] {
        &self.middlewares
    }

    fn locate(state: &StoreState, key: &str) -> Result<usize, StoreError> {
        state.domains.position(key).ok_or_else(|| {
            warn!(key, "domain is not specified during store creation");
            StoreError::DomainNotFound(key.to_string())
        })
    }
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            middlewares: Arc::clone(&self.middlewares),
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("domains", &self.domain_keys())
            .field("observers", &self.observer_count())
            .field("middlewares", &self.middlewares)
            .finish()
    }
}
