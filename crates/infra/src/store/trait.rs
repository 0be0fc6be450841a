use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_products::Product;

/// Product store failure.
///
/// The HTTP layer does not distinguish between these; every variant surfaces as
/// a server error. The split exists for logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend rejected or failed the operation (connectivity, constraints).
    #[error("store backend error: {0}")]
    Backend(String),

    /// A stored row could not be mapped to or from a product record.
    #[error("store serialization error: {0}")]
    Serialization(String),

    /// The store cannot serve requests at all (e.g. poisoned lock, closed pool).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence collaborator for product records.
///
/// Implementations own identifier assignment and ordering.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every stored product, in store-defined order.
    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Persist `product` and return the canonical stored form.
    ///
    /// - no `id`: insert under a freshly assigned identifier
    /// - known `id`: replace that record's fields, keeping the identifier
    /// - unknown `id`: insert under a freshly assigned identifier
    async fn save(&self, product: Product) -> Result<Product, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_all().await
    }

    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        (**self).save(product).await
    }
}
