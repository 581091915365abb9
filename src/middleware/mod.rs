//! Hooks that run before every write.
//!
//! A middleware sees the store and the pending mutation before the value is
//! replaced, so reads through the store still return the old value.

mod logger;
mod middleware;

pub use logger::logger_middleware;
pub use middleware::{create_middleware, Middleware, MiddlewareContext, Mutation};
