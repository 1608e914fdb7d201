//! Product storage abstraction.
//!
//! [`Catalog`](crate::catalog::Catalog) holds products behind [`ProductStore`]
//! rather than a concrete collection, so the same service logic runs against
//! in-memory, file-backed, or database-backed storage. The in-memory default
//! keeps products in a `BTreeMap` keyed by id: ids are assigned
//! monotonically, so id order is insertion order.

use crate::types::{Product, ProductId};
use std::collections::BTreeMap;

/// Backing storage for the product catalog. One writer (the catalog service),
/// any number of readers.
pub trait ProductStore {
    /// Adds a product, replacing any existing product with the same id.
    fn insert(&mut self, product: Product);

    /// Looks up a product by id.
    fn find(&self, id: ProductId) -> Option<Product>;

    /// Removes a product by id. Returns the removed product if it existed.
    fn remove(&mut self, id: ProductId) -> Option<Product>;

    /// All products in insertion order.
    fn list(&self) -> Vec<Product>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest id ever stored, used to resume the id counter over a
    /// pre-populated store. Must not go down when products are removed.
    fn max_id(&self) -> Option<ProductId>;
}

/// Map-backed product store. The default storage for a running process.
#[derive(Clone, Debug, Default)]
pub struct InMemoryProductStore {
    products: BTreeMap<ProductId, Product>,
    max_id: Option<ProductId>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for InMemoryProductStore {
    fn insert(&mut self, product: Product) {
        if self.max_id.map_or(true, |max| product.id > max) {
            self.max_id = Some(product.id);
        }
        self.products.insert(product.id, product);
    }

    fn find(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id).cloned()
    }

    fn remove(&mut self, id: ProductId) -> Option<Product> {
        self.products.remove(&id)
    }

    fn list(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.products.len()
    }

    fn max_id(&self) -> Option<ProductId> {
        self.max_id
    }
}
