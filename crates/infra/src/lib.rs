//! Infrastructure layer: product storage, request serialization, config.

pub mod config;
pub mod locks;
pub mod seed;
pub mod store;
pub mod warehouse;

pub use config::{ConfigError, WarehouseConfig};
pub use store::{InMemoryProductStore, ProductStore, StoreError};
pub use warehouse::{Warehouse, WarehouseError};
