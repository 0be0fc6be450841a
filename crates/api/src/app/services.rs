use std::sync::Arc;

use anyhow::Context;

use catalog_infra::{
    InMemoryProductStore, PostgresProductStore, ProductStore, ServiceConfig, StoreBackend,
};

/// Collaborators shared by every handler.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn ProductStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn ProductStore {
        self.store.as_ref()
    }
}

/// Construct the product store selected by `config`.
pub async fn build_store(config: &ServiceConfig) -> anyhow::Result<Arc<dyn ProductStore>> {
    match &config.store {
        StoreBackend::InMemory => {
            tracing::info!("using in-memory product store");
            Ok(Arc::new(InMemoryProductStore::new()))
        }
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            tracing::info!(max_connections, "using postgres product store");
            let store = PostgresProductStore::connect(database_url, *max_connections)
                .await
                .context("failed to connect to Postgres")?;
            Ok(Arc::new(store))
        }
    }
}
