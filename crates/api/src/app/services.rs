use aquaserve_customers::CustomerRegistry;

use crate::config::ApiConfig;

/// Shared state behind every handler.
///
/// Registry operations are synchronous and short, so handlers call them
/// directly instead of going through `spawn_blocking`.
#[derive(Debug)]
pub struct AppServices {
    registry: CustomerRegistry,
}

impl AppServices {
    pub fn new(registry: CustomerRegistry) -> Self {
        Self { registry }
    }

    /// In-memory registry with the configured capacity and tariff.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(CustomerRegistry::in_memory(
            config.registry,
            config.tariff.clone(),
        ))
    }

    pub fn registry(&self) -> &CustomerRegistry {
        &self.registry
    }
}
