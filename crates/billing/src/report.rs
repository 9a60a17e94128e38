//! Registry-wide summary statistics.

use serde::Serialize;

use aquaserve_core::{CustomerId, Entity};

/// A customer entity that carries a billed consumption.
pub trait Billable: Entity<Id = CustomerId> {
    fn consumption(&self) -> f64;
    fn bill_amount(&self) -> f64;
}

/// Monthly summary over a set of billed records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport<T> {
    pub total_customers: usize,
    pub total_revenue: f64,
    /// Mean consumption; 0 for an empty set.
    pub average_consumption: f64,
    /// Record with the largest bill (earliest id on ties); `None` for an empty set.
    pub highest_bill_customer: Option<T>,
}

impl<T> SummaryReport<T> {
    pub fn empty() -> Self {
        Self {
            total_customers: 0,
            total_revenue: 0.0,
            average_consumption: 0.0,
            highest_bill_customer: None,
        }
    }
}

/// Reduce `records` to a [`SummaryReport`].
///
/// Pure: the result depends only on the records, not on their order (apart
/// from floating-point summation order) or on how often it is called.
pub fn aggregate<T: Billable + Clone>(records: &[T]) -> SummaryReport<T> {
    if records.is_empty() {
        return SummaryReport::empty();
    }

    let total_revenue: f64 = records.iter().map(Billable::bill_amount).sum();
    let total_consumption: f64 = records.iter().map(Billable::consumption).sum();

    let mut highest = &records[0];
    for record in &records[1..] {
        let bill = record.bill_amount();
        let best = highest.bill_amount();
        if bill > best || (bill == best && record.id() < highest.id()) {
            highest = record;
        }
    }

    SummaryReport {
        total_customers: records.len(),
        total_revenue,
        average_consumption: total_consumption / records.len() as f64,
        highest_bill_customer: Some(highest.clone()),
    }
}
