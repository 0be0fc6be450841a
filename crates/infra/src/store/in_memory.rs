use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::instrument;

use catalog_products::{Product, ProductAttributes, ProductId};

use super::r#trait::{ProductStore, StoreError};

#[derive(Debug, Default)]
struct State {
    /// Highest identifier handed out so far. Identifiers are never reused.
    last_id: i64,
    rows: BTreeMap<ProductId, ProductAttributes>,
}

/// In-memory product store.
///
/// Intended for tests/dev. Identifiers start at 1; listing is in ascending id
/// order, which is also insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    state: RwLock<State>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().map(|s| s.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("in-memory product store lock poisoned".to_string())
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let state = self.state.read().map_err(|_| poisoned())?;

        Ok(state
            .rows
            .iter()
            .map(|(id, attributes)| Product::new(attributes.clone()).with_id(*id))
            .collect())
    }

    #[instrument(skip(self, product), fields(requested_id = ?product.id))]
    async fn save(&self, product: Product) -> Result<Product, StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;

        let Product { id, attributes } = product;
        let id = match id.filter(|id| state.rows.contains_key(id)) {
            Some(existing) => existing,
            None => {
                state.last_id += 1;
                ProductId::new(state.last_id)
            }
        };

        state.rows.insert(id, attributes.clone());
        tracing::debug!(product_id = %id, "product saved");

        Ok(Product::new(attributes).with_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Product {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = InMemoryProductStore::new();
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids_from_one() {
        let store = InMemoryProductStore::new();

        let a = store.save(record(json!({"name": "Widget"}))).await.unwrap();
        let b = store.save(record(json!({"name": "Gadget"}))).await.unwrap();

        assert_eq!(a.id, Some(ProductId::new(1)));
        assert_eq!(b.id, Some(ProductId::new(2)));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn saved_record_keeps_submitted_fields() {
        let store = InMemoryProductStore::new();
        let submitted = record(json!({"name": "Widget", "price": 9.99}));

        let saved = store.save(submitted.clone()).await.unwrap();

        assert_eq!(saved.attributes, submitted.attributes);
        assert_eq!(
            serde_json::to_value(&saved).unwrap(),
            json!({"id": 1, "name": "Widget", "price": 9.99})
        );
    }

    #[tokio::test]
    async fn save_with_known_id_replaces_fields() {
        let store = InMemoryProductStore::new();
        store.save(record(json!({"name": "Widget", "price": 9.99}))).await.unwrap();

        let updated = store
            .save(record(json!({"id": 1, "name": "Widget v2"})))
            .await
            .unwrap();

        assert_eq!(updated.id, Some(ProductId::new(1)));
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(
            serde_json::to_value(&all[0]).unwrap(),
            json!({"id": 1, "name": "Widget v2"})
        );
    }

    #[tokio::test]
    async fn save_with_unknown_id_assigns_fresh_id() {
        let store = InMemoryProductStore::new();

        let saved = store
            .save(record(json!({"id": 42, "name": "Widget"})))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(ProductId::new(1)));
        let next = store.save(record(json!({"name": "Gadget"}))).await.unwrap();
        assert_eq!(next.id, Some(ProductId::new(2)));
    }

    #[tokio::test]
    async fn concurrent_saves_get_distinct_ids() {
        let store = std::sync::Arc::new(InMemoryProductStore::new());

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.save(record(json!({ "n": i }))).await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap().id.unwrap().get());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=32).collect::<Vec<_>>());
        assert_eq!(store.list_all().await.unwrap().len(), 32);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn block_on<F: std::future::Future>(fut: F) -> F::Output {
            tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap()
                .block_on(fut)
        }

        proptest! {
            /// Property: listing after N saves returns exactly those records,
            /// in ascending id order, each field-for-field equal to its submission.
            #[test]
            fn list_returns_exactly_the_saved_records(
                names in proptest::collection::vec("[A-Za-z][A-Za-z0-9 ]{0,20}", 0..20),
            ) {
                let store = InMemoryProductStore::new();
                let (saved, listed) = block_on(async {
                    let mut saved = Vec::new();
                    for name in &names {
                        saved.push(store.save(record(json!({ "name": name }))).await.unwrap());
                    }
                    (saved, store.list_all().await.unwrap())
                });

                prop_assert_eq!(&listed, &saved);
                for (product, name) in listed.iter().zip(&names) {
                    prop_assert_eq!(product.attribute("name"), Some(&json!(name)));
                }
                let ids: Vec<i64> = listed.iter().map(|p| p.id.unwrap().get()).collect();
                prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
