use std::sync::Arc;

use warehouse_inventory::NameResolver;
use warehouse_infra::{
    seed::{self, SeedError},
    InMemoryProductStore, ProductStore, Warehouse, WarehouseConfig,
};

/// Store handle shared by the service; any backend behind the store contract.
pub type SharedStore = Arc<dyn ProductStore>;

/// Services shared by all handlers.
pub struct AppServices {
    warehouse: Warehouse<SharedStore>,
}

impl AppServices {
    pub fn new(store: SharedStore, names: NameResolver) -> Self {
        Self {
            warehouse: Warehouse::new(store, names),
        }
    }

    pub fn warehouse(&self) -> &Warehouse<SharedStore> {
        &self.warehouse
    }
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices")
            .field("name_resolver", &self.warehouse.name_resolver())
            .finish_non_exhaustive()
    }
}

/// Wire services from configuration: an in-memory store, optionally seeded.
pub fn build_services(config: &WarehouseConfig) -> Result<AppServices, SeedError> {
    let store: SharedStore = match &config.seed_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading seed catalog");
            let records = seed::load_seed_file(path)?;
            Arc::new(seed::seeded_store(records)?)
        }
        None => Arc::new(InMemoryProductStore::new()),
    };

    tracing::info!(name_suffix_limit = ?config.name_suffix_limit, "warehouse services ready");
    Ok(AppServices::new(store, NameResolver::new(config.name_suffix_limit)))
}
