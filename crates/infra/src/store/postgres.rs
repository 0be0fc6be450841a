//! Postgres-backed product store.
//!
//! Products live in a single `products` table (see `sql/products.sql`): a
//! `BIGSERIAL` identifier and a `JSONB` column holding every other field of the
//! record. Identifier assignment is left to the sequence.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | `PoolClosed`, `PoolTimedOut` | `Unavailable` |
//! | `ColumnDecode`, `Decode`, `ColumnNotFound` | `Serialization` |
//! | anything else (database, IO, TLS, ...) | `Backend` |

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;

use catalog_products::{Product, ProductAttributes, ProductId};

use super::r#trait::{ProductStore, StoreError};

/// Postgres-backed product store.
///
/// `Send + Sync`; share it behind an `Arc`. Every call checks a connection out
/// of the pool for a single statement, so there is no cross-request state here.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: Arc<PgPool>,
}

impl PostgresProductStore {
    /// Create a new store on an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url` and wrap it.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    #[instrument(skip(self, attributes), fields(product_id = %id), err)]
    async fn update(
        &self,
        id: ProductId,
        attributes: &ProductAttributes,
    ) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET attributes = $2
            WHERE id = $1
            RETURNING id, attributes
            "#,
        )
        .bind(id.get())
        .bind(Json(attributes))
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        row.map(|r| row_to_product(&r)).transpose()
    }

    #[instrument(skip(self, attributes), err)]
    async fn insert(&self, attributes: &ProductAttributes) -> Result<Product, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (attributes)
            VALUES ($1)
            RETURNING id, attributes
            "#,
        )
        .bind(Json(attributes))
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        row_to_product(&row)
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), fields(operation = "list_all"), err)]
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, attributes
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_all", e))?;

        let products = rows
            .iter()
            .map(row_to_product)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = products.len(), "listed products");
        Ok(products)
    }

    #[instrument(skip(self, product), fields(requested_id = ?product.id), err)]
    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        // An id the table does not know is overwritten by a fresh sequence value.
        if let Some(id) = product.id {
            if let Some(updated) = self.update(id, &product.attributes).await? {
                return Ok(updated);
            }
        }

        self.insert(&product.attributes).await
    }
}

fn row_to_product(row: &PgRow) -> Result<Product, StoreError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| map_sqlx_error("decode id", e))?;
    let Json(attributes): Json<ProductAttributes> = row
        .try_get("attributes")
        .map_err(|e| map_sqlx_error("decode attributes", e))?;

    Ok(Product::new(attributes).with_id(ProductId::new(id)))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("{operation}: {err}"))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Serialization(format!("{operation}: {err}"))
        }
        other => StoreError::Backend(format!("{operation}: {other}")),
    }
}
