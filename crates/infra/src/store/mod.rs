//! Product store boundary.
//!
//! The HTTP layer talks to storage only through [`ProductStore`]. Two backends
//! exist: an in-memory store for dev/tests and a Postgres store for deployment.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;
pub use r#trait::{ProductStore, StoreError};
