//! Error types returned by store operations.

use thiserror::Error;

/// Error type returned by user-supplied observer handlers and middlewares.
///
/// Any `std::error::Error` converts into it with `?`, including a
/// [`StoreError`] from a nested `set` call.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by [`Store`](crate::Store) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key was not declared when the store was constructed.
    #[error("domain `{0}` is not specified during store creation")]
    DomainNotFound(String),

    /// The same key was declared more than once.
    #[error("domain `{0}` is declared more than once")]
    DuplicateDomain(String),

    /// A middleware failed; the write was not applied.
    #[error("middleware `{name}` failed")]
    Middleware {
        /// Display name of the failing middleware
        name: String,
        /// Error returned by the middleware
        #[source]
        source: HandlerError,
    },

    /// An observer failed after the value was stored.
    #[error("observer on domain `{key}` failed")]
    Observer {
        /// Domain the observer was registered on
        key: String,
        /// Error returned by the observer
        #[source]
        source: HandlerError,
    },

    /// The declarative configuration could not be parsed.
    #[error("invalid store configuration: {0}")]
    Config(#[from] serde_json::Error),
}
