//! Warehouse service: runs inventory operations against a product store.
//!
//! Every quantity operation follows the same pipeline:
//!
//! ```text
//! QuantityChange
//!   ↓
//! 1. Lock the product id (per-key mutex)
//!   ↓
//! 2. Load the product from the store (absent → InvalidRequest)
//!   ↓
//! 3. Decide the new quantities (pure domain rules, no mutation)
//!   ↓
//! 4. Apply + persist (only on success; nothing is written on rejection)
//! ```
//!
//! Creates are serialized against each other so that the list → resolve name →
//! insert sequence always sees every committed name. Quantity operations never
//! rename a product, so they do not need to take part in that lock.
//!
//! Serialization is per `Warehouse` instance: writers that bypass it (another
//! process sharing the store) are not covered.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use warehouse_core::{Entity, ErrorReason, ProductId};
use warehouse_inventory::{NameResolver, NewProduct, Product, QuantityChange, QuantityOperation};

use crate::locks::KeyedLocks;
use crate::store::{ProductStore, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WarehouseError {
    /// The request was refused by the inventory rules (returned as data to the caller).
    #[error("request rejected: {0}")]
    Rejected(ErrorReason),

    /// The store failed; not a statement about the request itself.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ErrorReason> for WarehouseError {
    fn from(value: ErrorReason) -> Self {
        WarehouseError::Rejected(value)
    }
}

impl WarehouseError {
    /// The rejection reason, if this is a domain rejection.
    pub fn reason(&self) -> Option<ErrorReason> {
        match self {
            WarehouseError::Rejected(reason) => Some(*reason),
            WarehouseError::Store(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct Warehouse<S> {
    store: S,
    names: NameResolver,
    product_locks: KeyedLocks<ProductId>,
    create_lock: Mutex<()>,
}

impl<S> Warehouse<S> {
    pub fn new(store: S, names: NameResolver) -> Self {
        Self {
            store,
            names,
            product_locks: KeyedLocks::new(),
            create_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn name_resolver(&self) -> NameResolver {
        self.names
    }
}

impl<S> Warehouse<S>
where
    S: ProductStore,
{
    /// Point lookup. `None` means no such product.
    pub fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.store.get(id)
    }

    /// Products that can be offered publicly (something on the shelf that is
    /// not fully reserved), ordered by id.
    pub fn list_in_stock(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self
            .store
            .list()?
            .into_iter()
            .filter(Product::is_publicly_in_stock)
            .collect();
        products.sort_by_key(|p| p.id());
        Ok(products)
    }

    /// Reserve ("order") units of a product.
    pub fn reserve(&self, change: QuantityChange) -> Result<Product, WarehouseError> {
        self.change_quantity(QuantityOperation::Reserve, change)
    }

    /// Ship units of a product, fulfilling reservations first.
    pub fn ship(&self, change: QuantityChange) -> Result<Product, WarehouseError> {
        self.change_quantity(QuantityOperation::Ship, change)
    }

    /// Receive units of a product.
    pub fn restock(&self, change: QuantityChange) -> Result<Product, WarehouseError> {
        self.change_quantity(QuantityOperation::Restock, change)
    }

    /// Run one quantity operation through the load → decide → persist pipeline.
    ///
    /// Returns the product as persisted.
    pub fn change_quantity(
        &self,
        operation: QuantityOperation,
        change: QuantityChange,
    ) -> Result<Product, WarehouseError> {
        let result = self.product_locks.with_lock(&change.id, || -> Result<Product, WarehouseError> {
            // 1) Load
            let mut product = self
                .store
                .get(change.id)?
                .ok_or(WarehouseError::Rejected(ErrorReason::InvalidRequest))?;

            // 2) Decide (no mutation)
            let decided = product.decide(operation, change.quantity)?;

            // 3) Apply + persist
            product.apply(&decided);
            self.store.update_quantities(&product)?;
            Ok(product)
        });

        log_outcome(operation, change, &result);
        result
    }

    /// Create a product with a unique, trimmed name and nothing reserved.
    pub fn create(&self, candidate: &NewProduct) -> Result<Product, WarehouseError> {
        let draft = match candidate.validate() {
            Ok(draft) => draft,
            Err(reason) => {
                tracing::debug!(reason = reason.as_str(), "product creation rejected");
                return Err(reason.into());
            }
        };

        let _guard = self.create_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let existing = self.store.list().inspect_err(|e| {
            tracing::error!(error = %e, "failed to list products for name resolution");
        })?;
        let name = self
            .names
            .resolve(draft.name(), existing.iter().map(Product::name))
            .ok_or_else(|| {
                tracing::warn!(
                    candidate = draft.name(),
                    limit = ?self.names.limit(),
                    "no free name suffix within the configured limit"
                );
                WarehouseError::Rejected(ErrorReason::InvalidRequest)
            })?;

        let product = self.store.insert(draft.renamed(name)).inspect_err(|e| {
            tracing::error!(error = %e, "failed to insert product");
        })?;

        tracing::info!(
            product_id = %product.id(),
            name = product.name(),
            in_stock = product.in_stock_quantity(),
            "product created"
        );
        Ok(product)
    }
}

fn log_outcome(
    operation: QuantityOperation,
    change: QuantityChange,
    result: &Result<Product, WarehouseError>,
) {
    match result {
        Ok(product) => tracing::info!(
            operation = operation.as_str(),
            product_id = %change.id,
            quantity = change.quantity,
            in_stock = product.in_stock_quantity(),
            reserved = product.reserved_quantity(),
            "quantities updated"
        ),
        Err(WarehouseError::Rejected(reason)) => tracing::debug!(
            operation = operation.as_str(),
            product_id = %change.id,
            quantity = change.quantity,
            reason = reason.as_str(),
            "quantity change rejected"
        ),
        Err(WarehouseError::Store(e)) => tracing::error!(
            operation = operation.as_str(),
            product_id = %change.id,
            error = %e,
            "store failure during quantity change"
        ),
    }
}
