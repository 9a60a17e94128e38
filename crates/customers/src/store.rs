use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use aquaserve_core::{CustomerId, DomainError, DomainResult, Entity};

use crate::customer::CustomerRecord;

/// Append-only backing store for customer records, keyed by id.
///
/// Implementations must make `insert` and `insert_with` single atomic steps:
/// a concurrent reader sees the record fully or not at all.
pub trait CustomerStore: Send + Sync {
    /// Store a record under its own id. Fails if the id is already taken.
    fn insert(&self, record: CustomerRecord) -> DomainResult<()>;

    /// Assign the id after the highest stored one and store the record
    /// `build` makes for it, holding the write lock throughout.
    ///
    /// Fails with `CapacityExceeded` (without calling `build`) once the store
    /// holds `capacity` records. Registries sharing a store therefore never
    /// hand out the same id or overshoot the limit together.
    fn insert_with<F>(&self, capacity: usize, build: F) -> DomainResult<CustomerRecord>
    where
        F: FnOnce(CustomerId) -> CustomerRecord;

    fn get(&self, id: CustomerId) -> Option<CustomerRecord>;
    /// All records in ascending id (registration) order.
    fn list(&self) -> Vec<CustomerRecord>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> CustomerStore for Arc<S>
where
    S: CustomerStore + ?Sized,
{
    fn insert(&self, record: CustomerRecord) -> DomainResult<()> {
        (**self).insert(record)
    }

    fn insert_with<F>(&self, capacity: usize, build: F) -> DomainResult<CustomerRecord>
    where
        F: FnOnce(CustomerId) -> CustomerRecord,
    {
        (**self).insert_with(capacity, build)
    }

    fn get(&self, id: CustomerId) -> Option<CustomerRecord> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<CustomerRecord> {
        (**self).list()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// In-memory store for dev/tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    inner: RwLock<BTreeMap<CustomerId, CustomerRecord>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerStore for InMemoryCustomerStore {
    fn insert(&self, record: CustomerRecord) -> DomainResult<()> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = record.id();
        if map.contains_key(&id) {
            return Err(DomainError::invalid_id(format!("customer {id} is already stored")));
        }
        map.insert(id, record);
        Ok(())
    }

    fn insert_with<F>(&self, capacity: usize, build: F) -> DomainResult<CustomerRecord>
    where
        F: FnOnce(CustomerId) -> CustomerRecord,
    {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if map.len() >= capacity {
            return Err(DomainError::capacity_exceeded(capacity));
        }

        let id = map.keys().next_back().map_or(CustomerId::FIRST, |last| last.next());
        let record = build(id);
        debug_assert_eq!(record.id(), id);
        map.insert(id, record.clone());
        Ok(record)
    }

    fn get(&self, id: CustomerId) -> Option<CustomerRecord> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&id).cloned()
    }

    fn list(&self) -> Vec<CustomerRecord> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
