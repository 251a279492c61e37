use serde::{Deserialize, Serialize};

use warehouse_core::{DomainResult, Entity, ErrorReason, ProductId};

/// A stocked product: what is on the shelf and how much of it is promised.
///
/// Invariant after every accepted change: `0 <= reserved_quantity <= in_stock_quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    in_stock_quantity: i64,
    reserved_quantity: i64,
}

impl Product {
    /// Rebuild a product from stored state.
    ///
    /// Refuses records that break the quantity invariant so that a store can
    /// never hand the rules a product they could not have produced.
    pub fn restore(
        id: ProductId,
        name: impl Into<String>,
        in_stock_quantity: i64,
        reserved_quantity: i64,
    ) -> DomainResult<Self> {
        if in_stock_quantity < 0 || reserved_quantity < 0 {
            return Err(ErrorReason::QuantityInvalid);
        }
        if reserved_quantity > in_stock_quantity {
            return Err(ErrorReason::NotEnoughQuantity);
        }
        Ok(Self {
            id,
            name: name.into(),
            in_stock_quantity,
            reserved_quantity,
        })
    }

    /// Materialize a validated draft under a store-assigned id. Nothing is reserved yet.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            in_stock_quantity: draft.in_stock_quantity,
            reserved_quantity: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn in_stock_quantity(&self) -> i64 {
        self.in_stock_quantity
    }

    pub fn reserved_quantity(&self) -> i64 {
        self.reserved_quantity
    }

    /// Whether the product should be offered publicly: something is on the
    /// shelf and not all of it is reserved.
    pub fn is_publicly_in_stock(&self) -> bool {
        self.in_stock_quantity > 0 && self.in_stock_quantity > self.reserved_quantity
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// The three quantity-changing operations on an existing product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum QuantityOperation {
    /// Promise units against a future shipment ("order").
    Reserve,
    /// Units leave the warehouse; fulfils reservations first.
    Ship,
    /// Units arrive at the warehouse.
    Restock,
}

impl QuantityOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            QuantityOperation::Reserve => "reserve",
            QuantityOperation::Ship => "ship",
            QuantityOperation::Restock => "restock",
        }
    }
}

impl core::fmt::Display for QuantityOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to change the quantities of one product.
///
/// `quantity` is caller-supplied and may be negative; every operation rejects
/// a negative quantity rather than reading it as a decrease.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChange {
    pub id: ProductId,
    pub quantity: i64,
}

/// Quantities a product will hold once an accepted change is applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QuantitiesChanged {
    pub in_stock_quantity: i64,
    pub reserved_quantity: i64,
}

impl Product {
    /// Decide the outcome of `operation` without touching state.
    ///
    /// Check order matters for which single reason is reported: reserve and ship
    /// evaluate the shortage condition before the sign of `quantity`.
    pub fn decide(&self, operation: QuantityOperation, quantity: i64) -> DomainResult<QuantitiesChanged> {
        match operation {
            QuantityOperation::Reserve => self.decide_reserve(quantity),
            QuantityOperation::Ship => self.decide_ship(quantity),
            QuantityOperation::Restock => self.decide_restock(quantity),
        }
    }

    /// Evolve state from an accepted decision.
    pub fn apply(&mut self, change: &QuantitiesChanged) {
        self.in_stock_quantity = change.in_stock_quantity;
        self.reserved_quantity = change.reserved_quantity;
    }

    pub fn reserve(&mut self, quantity: i64) -> DomainResult<()> {
        self.execute(QuantityOperation::Reserve, quantity)
    }

    pub fn ship(&mut self, quantity: i64) -> DomainResult<()> {
        self.execute(QuantityOperation::Ship, quantity)
    }

    pub fn restock(&mut self, quantity: i64) -> DomainResult<()> {
        self.execute(QuantityOperation::Restock, quantity)
    }

    fn execute(&mut self, operation: QuantityOperation, quantity: i64) -> DomainResult<()> {
        let change = self.decide(operation, quantity)?;
        self.apply(&change);
        Ok(())
    }

    fn decide_reserve(&self, quantity: i64) -> DomainResult<QuantitiesChanged> {
        // An overflowing sum is larger than any stock level.
        let reserved = self.reserved_quantity.checked_add(quantity);
        match reserved {
            None => Err(ErrorReason::NotEnoughQuantity),
            Some(r) if r > self.in_stock_quantity => Err(ErrorReason::NotEnoughQuantity),
            Some(_) if quantity < 0 => Err(ErrorReason::QuantityInvalid),
            Some(r) => Ok(QuantitiesChanged {
                in_stock_quantity: self.in_stock_quantity,
                reserved_quantity: r,
            }),
        }
    }

    fn decide_ship(&self, quantity: i64) -> DomainResult<QuantitiesChanged> {
        // Overflow only happens for hugely negative quantities, which are not a shortage.
        let remaining = self.in_stock_quantity.checked_sub(quantity);
        match remaining {
            Some(r) if r < 0 => Err(ErrorReason::NotEnoughQuantity),
            _ if quantity < 0 => Err(ErrorReason::QuantityInvalid),
            None => Err(ErrorReason::QuantityInvalid),
            Some(r) => Ok(QuantitiesChanged {
                in_stock_quantity: r,
                reserved_quantity: (self.reserved_quantity - quantity).max(0),
            }),
        }
    }

    fn decide_restock(&self, quantity: i64) -> DomainResult<QuantitiesChanged> {
        if quantity < 0 {
            return Err(ErrorReason::QuantityInvalid);
        }
        let in_stock = self
            .in_stock_quantity
            .checked_add(quantity)
            .ok_or(ErrorReason::QuantityInvalid)?;
        Ok(QuantitiesChanged {
            in_stock_quantity: in_stock,
            reserved_quantity: self.reserved_quantity,
        })
    }
}

/// Candidate product as submitted for creation.
///
/// Any submitted id or reserved quantity is ignored: the store assigns ids and
/// new products start with nothing reserved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub in_stock_quantity: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, in_stock_quantity: i64) -> Self {
        Self {
            name: Some(name.into()),
            in_stock_quantity,
        }
    }

    /// Validate and normalize the candidate.
    ///
    /// The quantity is checked first, then the raw name, then the trimmed name.
    pub fn validate(&self) -> DomainResult<ProductDraft> {
        if self.in_stock_quantity < 0 {
            return Err(ErrorReason::QuantityInvalid);
        }
        let raw = match self.name.as_deref() {
            None | Some("") => return Err(ErrorReason::InvalidRequest),
            Some(raw) => raw,
        };
        let name = raw.trim();
        if name.is_empty() {
            return Err(ErrorReason::InvalidRequest);
        }
        Ok(ProductDraft {
            name: name.to_string(),
            in_stock_quantity: self.in_stock_quantity,
        })
    }
}

/// A validated candidate: trimmed, non-empty name and non-negative stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    in_stock_quantity: i64,
}

impl ProductDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn in_stock_quantity(&self) -> i64 {
        self.in_stock_quantity
    }

    /// Replace the name with its deduplicated form.
    pub fn renamed(self, name: String) -> Self {
        Self { name, ..self }
    }
}
