use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use aquaserve_billing::{SummaryReport, TariffTable, aggregate, format_money};
use aquaserve_core::{CustomerId, DomainError, DomainResult};

use crate::customer::{BilledCustomer, CustomerRecord, NewCustomer};
use crate::store::{CustomerStore, InMemoryCustomerStore};

/// Capacity of the reference configuration.
pub const DEFAULT_CAPACITY: usize = 50;

/// Registry limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum number of records held at once (at least 1).
    pub capacity: usize,
}

impl RegistryConfig {
    pub fn with_capacity(capacity: usize) -> DomainResult<Self> {
        if capacity == 0 {
            return Err(DomainError::validation("capacity must be at least 1"));
        }
        Ok(Self { capacity })
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Monthly report: the summary plus the exact snapshot it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub summary: SummaryReport<CustomerRecord>,
    pub customers: Vec<CustomerRecord>,
}

/// Owner of all customer records.
///
/// The capacity check, id assignment and insertion happen together under the
/// store's write lock (see [`CustomerStore::insert_with`]), so several
/// registries may share one store. Reads see a registration fully or not at
/// all.
#[derive(Debug)]
pub struct CustomerRegistry<S = InMemoryCustomerStore>
where
    S: CustomerStore,
{
    store: S,
    tariff: Arc<TariffTable>,
    capacity: usize,
}

impl CustomerRegistry<InMemoryCustomerStore> {
    /// Empty in-memory registry.
    pub fn in_memory(config: RegistryConfig, tariff: TariffTable) -> Self {
        Self::with_store(InMemoryCustomerStore::new(), config, tariff)
    }
}

impl<S> CustomerRegistry<S>
where
    S: CustomerStore,
{
    /// Registry over an existing store. Ids continue after the highest stored id.
    pub fn with_store(store: S, config: RegistryConfig, tariff: TariffTable) -> Self {
        Self {
            store,
            tariff: Arc::new(tariff),
            capacity: config.capacity,
        }
    }

    /// Validate and register a customer from raw values.
    pub fn register(
        &self,
        full_name: &str,
        previous_reading: f64,
        current_reading: f64,
    ) -> DomainResult<CustomerRecord> {
        let new = NewCustomer::new(full_name, previous_reading, current_reading).inspect_err(|e| {
            warn!(error = %e, "customer registration rejected");
        })?;
        self.register_new(new)
    }

    /// Register already-validated input.
    ///
    /// Either the billed record is stored under a fresh id, or nothing
    /// changes and an error is returned.
    pub fn register_new(&self, new: NewCustomer) -> DomainResult<CustomerRecord> {
        let billed = BilledCustomer::new(new, &self.tariff)?;

        let ceiling = self.amount_ceiling();
        if billed.consumption() > ceiling || billed.bill_amount() > ceiling {
            warn!(
                consumption = billed.consumption(),
                "customer registration rejected: readings too large"
            );
            return Err(DomainError::validation("readings are too large to bill"));
        }

        let record = self
            .store
            .insert_with(self.capacity, |id| billed.into_record(id))
            .inspect_err(|e| {
                warn!(capacity = self.capacity, error = %e, "customer registration rejected");
            })?;

        info!(
            customer_id = %record.customer_id(),
            consumption = record.consumption(),
            bill = %format_money(self.tariff.currency(), record.bill_amount()),
            "customer registered"
        );

        Ok(record)
    }

    pub fn get(&self, id: CustomerId) -> DomainResult<CustomerRecord> {
        self.store.get(id).ok_or_else(DomainError::not_found)
    }

    /// All records in registration order.
    pub fn list(&self) -> Vec<CustomerRecord> {
        self.store.list()
    }

    /// Summary statistics over one consistent snapshot of the registry.
    pub fn monthly_summary(&self) -> MonthlySummary {
        let customers = self.store.list();
        let summary = aggregate(&customers);
        MonthlySummary { summary, customers }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.store.len())
    }

    pub fn tariff(&self) -> &TariffTable {
        &self.tariff
    }

    /// Largest consumption or bill a single record may carry. A full registry
    /// of such records still sums to finite totals.
    fn amount_ceiling(&self) -> f64 {
        f64::MAX / (2.0 * self.capacity as f64)
    }
}
