//! Products module.
//!
//! This crate contains the product record exchanged between the HTTP layer and
//! the product store. It is pure data (no IO, no HTTP, no storage).

pub mod product;

pub use product::{Product, ProductAttributes, ProductId};
