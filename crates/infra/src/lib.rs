//! Infrastructure layer: product storage and configuration.

pub mod config;
pub mod store;

pub use config::{ConfigError, ServiceConfig, StoreBackend};
pub use store::{InMemoryProductStore, PostgresProductStore, ProductStore, StoreError};
