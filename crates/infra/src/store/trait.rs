use std::sync::Arc;

use thiserror::Error;

use warehouse_core::ProductId;
use warehouse_inventory::{Product, ProductDraft};

/// Product store operation error.
///
/// These are **infrastructure errors**, kept apart from the domain's
/// [`ErrorReason`](warehouse_core::ErrorReason): a store failure is never
/// reported as a rejected request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An update targeted a record that does not exist.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The store could not assign a fresh identifier.
    #[error("product identifier space exhausted")]
    IdsExhausted,

    /// The backend failed (I/O, poisoned lock, connection loss, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence contract for products.
///
/// "Not found" is an explicit `None`, never a default-constructed product.
pub trait ProductStore: Send + Sync {
    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Full snapshot. Order is not significant.
    fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Insert a validated draft; the store assigns the identifier.
    fn insert(&self, draft: ProductDraft) -> Result<Product, StoreError>;

    /// Persist the quantities of an existing product.
    fn update_quantities(&self, product: &Product) -> Result<(), StoreError>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list()
    }

    fn insert(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        (**self).insert(draft)
    }

    fn update_quantities(&self, product: &Product) -> Result<(), StoreError> {
        (**self).update_quantities(product)
    }
}
