use crate::error::HandlerError;
use crate::store::Store;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type MiddlewareFn = dyn Fn(&MiddlewareContext<'_>) -> Result<(), HandlerError> + Send + Sync;

/// The write a middleware is being asked about.
#[derive(Clone, Copy, Debug)]
pub struct Mutation<'a> {
    /// Domain being written.
    pub key: &'a str,
    /// Value about to be stored.
    pub value: &'a Value,
}

/// Arguments passed to a middleware on each write.
#[derive(Clone, Copy, Debug)]
pub struct MiddlewareContext<'a> {
    /// The store being written. Reads see the pre-mutation value; a `set`
    /// made from here is a nested write through the full protocol.
    pub store: &'a Store,
    /// The pending write.
    pub incoming_mutation: Mutation<'a>,
}

/// A named hook invoked on every `set` before the value is replaced.
///
/// Middlewares run for their side effects. They cannot veto or rewrite the
/// pending value; returning an error aborts the write instead.
#[derive(Clone)]
pub struct Middleware {
    name: String,
    exec: Arc<MiddlewareFn>,
}

impl Middleware {
    /// Wrap a handler with a display name.
    pub fn new<F>(name: impl Into<String>, exec: F) -> Self
    where
        F: Fn(&MiddlewareContext<'_>) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            exec: Arc::new(exec),
        }
    }

    /// Display name. Names need not be unique within a store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the handler.
    pub fn exec(&self, context: &MiddlewareContext<'_>) -> Result<(), HandlerError> {
        (self.exec)(context)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Create a middleware from a handler and a display name.
///
/// # Example
///
/// ```
/// use observact::{create_middleware, json, Domain, Store};
///
/// let audit = create_middleware(
///     |ctx| {
///         let current = ctx.store.get(ctx.incoming_mutation.key)?;
///         println!("{current} -> {}", ctx.incoming_mutation.value);
///         Ok(())
///     },
///     "audit",
/// );
///
/// let store = Store::with_middlewares(vec![Domain::new("theme", "light")], vec![audit]).unwrap();
/// store.set("theme", json!("dark")).unwrap();
/// ```
pub fn create_middleware<F>(exec: F, name: impl Into<String>) -> Middleware
where
    F: Fn(&MiddlewareContext<'_>) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    Middleware::new(name, exec)
}
