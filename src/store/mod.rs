//! Observable domain state.
//!
//! A [`Store`] holds a fixed set of named [`Domain`]s. Values are read with
//! `get`, written with `set`, and observed per domain.

mod domain;
mod observer;
mod store;

pub use domain::Domain;
pub use store::Store;
