//! # Observact
//!
//! A minimal observable key-value state store for Rust.
//!
//! ## Domains
//!
//! A store is built from a fixed list of named domains, each with an
//! initial [`Value`]. Domains cannot be added or removed afterwards:
//! - `get` / `read` - Current value of a domain
//! - `set` / `update` - Replace a value and notify observers
//! - `observe` / `clear_observers` - Per-domain change handlers
//!
//! ## Middleware
//!
//! Middlewares intercept every write before it is applied, in registration
//! order, for side effects such as logging or validation:
//! - [`create_middleware`] - Wrap a handler with a display name
//! - [`logger_middleware`] - Built-in `tracing` logger
//!
//! ```
//! use observact::{json, Domain, Store};
//!
//! let store = Store::new(vec![Domain::new("theme", "light")]).unwrap();
//! store
//!     .observe("theme", |value| {
//!         println!("theme is now {value}");
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! store.set("theme", json!("dark")).unwrap();
//! assert_eq!(store.get("theme").unwrap(), json!("dark"));
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod store;

// Re-export main types for convenience
pub use config::{create_store, StoreConfig};
pub use error::{HandlerError, StoreError};
pub use middleware::{create_middleware, logger_middleware, Middleware, MiddlewareContext, Mutation};
pub use serde_json::{json, Value};
pub use store::{Domain, Store};
