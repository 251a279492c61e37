//! Inventory domain module.
//!
//! This crate contains the business rules for stocked products, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod naming;
pub mod product;

pub use naming::{NameResolver, SuffixLimit};
pub use product::{
    NewProduct, Product, ProductDraft, QuantitiesChanged, QuantityChange, QuantityOperation,
};
