use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use warehouse_core::{Entity, ProductId};
use warehouse_inventory::{Product, ProductDraft};

use super::r#trait::{ProductStore, StoreError};

#[derive(Debug)]
struct Records {
    products: BTreeMap<ProductId, Product>,
    next_id: i64,
}

impl Records {
    fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products: BTreeMap<ProductId, Product> =
            products.into_iter().map(|p| (p.id(), p)).collect();
        let next_id = products
            .keys()
            .next_back()
            .map(|id| id.get().saturating_add(1))
            .unwrap_or(1)
            .max(1);
        Self { products, next_id }
    }
}

/// In-memory product store.
///
/// Intended for tests/dev. Identifiers are assigned sequentially starting at 1.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<Records>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    /// Start from existing records, keeping their identifiers.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            inner: RwLock::new(Records::with_products(products)),
        }
    }

    /// Number of stored products. Counting is read-only, so a poisoned lock
    /// is read through rather than reported.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .products
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl ProductStore for InMemoryProductStore {
    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let records = self.inner.read().map_err(|_| poisoned())?;
        Ok(records.products.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Product>, StoreError> {
        let records = self.inner.read().map_err(|_| poisoned())?;
        Ok(records.products.values().cloned().collect())
    }

    fn insert(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut records = self.inner.write().map_err(|_| poisoned())?;

        let id = ProductId::new(records.next_id);
        records.next_id = records
            .next_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;

        let product = Product::from_draft(id, draft);
        records.products.insert(id, product.clone());
        Ok(product)
    }

    fn update_quantities(&self, product: &Product) -> Result<(), StoreError> {
        let mut records = self.inner.write().map_err(|_| poisoned())?;
        match records.products.get_mut(&product.id()) {
            Some(stored) => {
                *stored = product.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(product.id())),
        }
    }
}
