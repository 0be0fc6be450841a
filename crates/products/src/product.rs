use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Open set of product fields (name, price, ...) carried verbatim.
pub type ProductAttributes = Map<String, JsonValue>;

/// Product identifier, assigned by the product store on first save.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

/// A product record.
///
/// The record is schema-less apart from `id`: every other JSON member lands in
/// `attributes` and is written back out unchanged. `id` is `None` until the
/// store has persisted the record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,

    #[serde(flatten)]
    pub attributes: ProductAttributes,
}

impl Product {
    /// A not-yet-persisted product with the given fields.
    pub fn new(attributes: ProductAttributes) -> Self {
        Self { id: None, attributes }
    }

    /// The same record under a store-assigned identifier.
    pub fn with_id(self, id: ProductId) -> Self {
        Self {
            id: Some(id),
            attributes: self.attributes,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn attribute(&self, name: &str) -> Option<&JsonValue> {
        self.attributes.get(name)
    }
}
