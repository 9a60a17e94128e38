//! Customer registry: registration rules, immutable billed records, storage.
//!
//! The registry is the only writer. It validates input, enforces capacity,
//! assigns identifiers and bills each record once, at registration.

pub mod customer;
pub mod registry;
pub mod store;

pub use customer::{CustomerRecord, NewCustomer, parse_reading};
pub use registry::{CustomerRegistry, DEFAULT_CAPACITY, MonthlySummary, RegistryConfig};
pub use store::{CustomerStore, InMemoryCustomerStore};
