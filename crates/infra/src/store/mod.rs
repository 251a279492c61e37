//! Product store boundary.
//!
//! This module defines the persistence abstraction the warehouse service runs
//! against. The contract is deliberately small: point lookup, full listing,
//! insert, and update of a single record. Stores give read-your-writes
//! consistency and atomic single-record updates; nothing more is assumed.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryProductStore;
pub use r#trait::{ProductStore, StoreError};
