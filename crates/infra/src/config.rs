//! Configuration loading and representation.
//!
//! Everything comes from environment variables:
//!
//! - `WAREHOUSE_BIND_ADDR`: listen address (default `0.0.0.0:8080`)
//! - `WAREHOUSE_NAME_SUFFIX_LIMIT`: highest `" (n)"` suffix tried when a
//!   product name collides; unset or `unbounded` means no limit
//! - `WAREHOUSE_SEED_PATH`: optional JSON file with the initial catalog

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::path::PathBuf;

use thiserror::Error;

use warehouse_inventory::SuffixLimit;

pub const BIND_ADDR_VAR: &str = "WAREHOUSE_BIND_ADDR";
pub const NAME_SUFFIX_LIMIT_VAR: &str = "WAREHOUSE_NAME_SUFFIX_LIMIT";
pub const SEED_PATH_VAR: &str = "WAREHOUSE_SEED_PATH";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a socket address (got {value:?})")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var} must be a positive integer or \"unbounded\" (got {value:?})")]
    InvalidSuffixLimit { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseConfig {
    pub bind_addr: SocketAddr,
    pub name_suffix_limit: SuffixLimit,
    pub seed_path: Option<PathBuf>,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            name_suffix_limit: SuffixLimit::Unbounded,
            seed_path: None,
        }
    }
}

impl WarehouseConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup` (a stand-in for the environment).
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = get(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_VAR,
                value: bind_addr.clone(),
            })?;

        let name_suffix_limit = match get(NAME_SUFFIX_LIMIT_VAR) {
            None => SuffixLimit::Unbounded,
            Some(v) => parse_suffix_limit(&v)?,
        };

        let seed_path = get(SEED_PATH_VAR).map(PathBuf::from);

        Ok(Self {
            bind_addr,
            name_suffix_limit,
            seed_path,
        })
    }
}

fn parse_suffix_limit(value: &str) -> Result<SuffixLimit, ConfigError> {
    if value.eq_ignore_ascii_case("unbounded") {
        return Ok(SuffixLimit::Unbounded);
    }
    value
        .parse::<NonZeroU32>()
        .map(SuffixLimit::AtMost)
        .map_err(|_| ConfigError::InvalidSuffixLimit {
            var: NAME_SUFFIX_LIMIT_VAR,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<WarehouseConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WarehouseConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]).unwrap(), WarehouseConfig::default());
    }

    #[test]
    fn reads_all_values() {
        let cfg = config(&[
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
            (NAME_SUFFIX_LIMIT_VAR, "9"),
            (SEED_PATH_VAR, "/tmp/seed.json"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(
            cfg.name_suffix_limit,
            SuffixLimit::AtMost(NonZeroU32::new(9).unwrap())
        );
        assert_eq!(cfg.seed_path, Some(PathBuf::from("/tmp/seed.json")));
    }

    #[test]
    fn unbounded_keyword_and_blank_values() {
        let cfg = config(&[(NAME_SUFFIX_LIMIT_VAR, "Unbounded"), (SEED_PATH_VAR, "  ")]).unwrap();
        assert_eq!(cfg.name_suffix_limit, SuffixLimit::Unbounded);
        assert_eq!(cfg.seed_path, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config(&[(BIND_ADDR_VAR, "not-an-addr")]),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
        for bad in ["0", "-3", "many"] {
            assert!(matches!(
                config(&[(NAME_SUFFIX_LIMIT_VAR, bad)]),
                Err(ConfigError::InvalidSuffixLimit { .. })
            ));
        }
    }
}
