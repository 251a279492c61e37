//! Initial catalog loading for the in-memory store.
//!
//! A seed file is a JSON array of records:
//!
//! ```json
//! [{ "name": "Widget", "inStockQuantity": 5, "reservedQuantity": 1 }]
//! ```
//!
//! Records are numbered from 1 in file order and stored as-is. Names are
//! trimmed but never suffixed: a file that repeats a name is refused, as is a
//! record breaking the quantity invariant.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use warehouse_core::{ErrorReason, ProductId};
use warehouse_inventory::Product;

use crate::store::InMemoryProductStore;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    pub name: String,
    pub in_stock_quantity: i64,
    #[serde(default)]
    pub reserved_quantity: i64,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("seed record {index} ({name:?}) is invalid: {reason}")]
    InvalidRecord {
        index: usize,
        name: String,
        reason: ErrorReason,
    },
}

/// Parse seed records from JSON text.
pub fn parse_seed(json: &str) -> Result<Vec<SeedRecord>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a seed file.
pub fn load_seed_file(path: &Path) -> Result<Vec<SeedRecord>, SeedError> {
    let text = std::fs::read_to_string(path)?;
    parse_seed(&text)
}

/// Build an in-memory store holding `records`, numbered from 1.
pub fn seeded_store(records: Vec<SeedRecord>) -> Result<InMemoryProductStore, SeedError> {
    let mut products = Vec::with_capacity(records.len());
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let id = ProductId::new(index as i64 + 1);
        let name = record.name.trim();
        if name.is_empty() || !seen.insert(name.to_string()) {
            return Err(SeedError::InvalidRecord {
                index,
                name: record.name,
                reason: ErrorReason::InvalidRequest,
            });
        }
        let product = Product::restore(id, name, record.in_stock_quantity, record.reserved_quantity)
            .map_err(|reason| SeedError::InvalidRecord {
                index,
                name: record.name.clone(),
                reason,
            })?;
        products.push(product);
    }

    tracing::info!(count = products.len(), "seeded product store");
    Ok(InMemoryProductStore::with_products(products))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::store::ProductStore;

    #[test]
    fn seeds_records_in_file_order() {
        let records = parse_seed(
            r#"[
                { "name": "Widget", "inStockQuantity": 5, "reservedQuantity": 1 },
                { "name": " Gadget ", "inStockQuantity": 0 }
            ]"#,
        )
        .unwrap();
        let store = seeded_store(records).unwrap();

        let widget = store.get(ProductId::new(1)).unwrap().unwrap();
        assert_eq!(widget.name(), "Widget");
        assert_eq!(widget.reserved_quantity(), 1);

        let gadget = store.get(ProductId::new(2)).unwrap().unwrap();
        assert_eq!(gadget.name(), "Gadget");
        assert_eq!(gadget.reserved_quantity(), 0);
    }

    #[test]
    fn refuses_records_breaking_the_invariant() {
        let records = parse_seed(r#"[{ "name": "Widget", "inStockQuantity": 1, "reservedQuantity": 2 }]"#)
            .unwrap();
        match seeded_store(records) {
            Err(SeedError::InvalidRecord { index, reason, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(reason, ErrorReason::NotEnoughQuantity);
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn refuses_blank_names() {
        let records = parse_seed(r#"[{ "name": "  ", "inStockQuantity": 1 }]"#).unwrap();
        assert!(matches!(
            seeded_store(records),
            Err(SeedError::InvalidRecord {
                reason: ErrorReason::InvalidRequest,
                ..
            })
        ));
    }

    #[test]
    fn refuses_duplicate_names() {
        let records = parse_seed(
            r#"[
                { "name": "Widget", "inStockQuantity": 1 },
                { "name": "Gadget", "inStockQuantity": 1 },
                { "name": " Widget ", "inStockQuantity": 2 }
            ]"#,
        )
        .unwrap();
        match seeded_store(records) {
            Err(SeedError::InvalidRecord { index, name, reason }) => {
                assert_eq!(index, 2);
                assert_eq!(name, " Widget ");
                assert_eq!(reason, ErrorReason::InvalidRequest);
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn names_differing_only_in_case_are_distinct() {
        let records = parse_seed(
            r#"[{ "name": "Widget", "inStockQuantity": 1 }, { "name": "widget", "inStockQuantity": 1 }]"#,
        )
        .unwrap();
        assert_eq!(seeded_store(records).unwrap().len(), 2);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{ "name": "Widget", "inStockQuantity": 3 }}]"#).unwrap();

        let records = load_seed_file(file.path()).unwrap();
        assert_eq!(
            records,
            vec![SeedRecord {
                name: "Widget".to_string(),
                in_stock_quantity: 3,
                reserved_quantity: 0,
            }]
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(parse_seed("{not json"), Err(SeedError::Parse(_))));
    }
}
