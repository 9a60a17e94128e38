//! Service configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `AQUASERVE_BIND_ADDR` | `0.0.0.0:5000` |
//! | `AQUASERVE_CAPACITY` | `50` |
//! | `AQUASERVE_TARIFF_PATH` | built-in reference tariff |
//! | `AQUASERVE_LOG_FORMAT` | `json` |

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use aquaserve_billing::TariffTable;
use aquaserve_customers::{DEFAULT_CAPACITY, RegistryConfig};
use aquaserve_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "AQUASERVE_BIND_ADDR";
pub const CAPACITY_VAR: &str = "AQUASERVE_CAPACITY";
pub const TARIFF_PATH_VAR: &str = "AQUASERVE_TARIFF_PATH";
pub const LOG_FORMAT_VAR: &str = "AQUASERVE_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },

    #[error("failed to read tariff file {path}: {source}")]
    TariffRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tariff file {path}: {source}")]
    TariffParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub registry: RegistryConfig,
    pub tariff: TariffTable,
    pub log_format: LogFormat,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| invalid(BIND_ADDR_VAR, e))?;

        let capacity = match var(CAPACITY_VAR) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| invalid(CAPACITY_VAR, e))?,
            None => DEFAULT_CAPACITY,
        };
        let registry = RegistryConfig::with_capacity(capacity).map_err(|e| invalid(CAPACITY_VAR, e))?;

        let tariff = match var(TARIFF_PATH_VAR) {
            Some(path) => load_tariff(Path::new(path.trim()))?,
            None => TariffTable::standard(),
        };

        let log_format = match var(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|e| invalid(LOG_FORMAT_VAR, e))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            registry,
            tariff,
            log_format,
        })
    }
}

/// Load and validate a JSON tariff file.
pub fn load_tariff(path: &Path) -> Result<TariffTable, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::TariffRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::TariffParse {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(var: &'static str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidVar {
        var,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:5000".parse().unwrap());
        assert_eq!(config.registry.capacity, 50);
        assert_eq!(config.tariff, TariffTable::standard());
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "127.0.0.1:8081"),
            (CAPACITY_VAR, "5"),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8081);
        assert_eq!(config.registry.capacity, 5);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ApiConfig::from_lookup(lookup(&[(CAPACITY_VAR, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: CAPACITY_VAR, .. }));

        let err = ApiConfig::from_lookup(lookup(&[(CAPACITY_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: CAPACITY_VAR, .. }));

        let err = ApiConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: BIND_ADDR_VAR, .. }));
    }

    #[test]
    fn loads_tariff_file() {
        let path = std::env::temp_dir().join(format!("aquaserve-tariff-{}.json", uuid::Uuid::now_v7()));
        std::fs::write(
            &path,
            r#"{"currency":"Ksh","bands":[{"up_to":20,"rate":20},{"rate":50}]}"#,
        )
        .unwrap();

        let config =
            ApiConfig::from_lookup(lookup(&[(TARIFF_PATH_VAR, path.to_str().unwrap())])).unwrap();
        assert_eq!(config.tariff.bands().len(), 2);
        assert_eq!(config.tariff.bill(30.0).unwrap(), 20.0 * 20.0 + 10.0 * 50.0);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_or_invalid_tariff_file_is_reported() {
        let err = load_tariff(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::TariffRead { .. }));

        let path = std::env::temp_dir().join(format!("aquaserve-tariff-{}.json", uuid::Uuid::now_v7()));
        std::fs::write(&path, r#"{"currency":"Ksh","bands":[]}"#).unwrap();
        let err = load_tariff(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TariffParse { .. }));
        std::fs::remove_file(&path).unwrap();
    }
}
