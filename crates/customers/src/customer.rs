use serde::Serialize;

use aquaserve_billing::{Billable, TariffTable, consumption};
use aquaserve_core::{CustomerId, DomainError, DomainResult, Entity};

/// Validated registration input.
///
/// Holding a `NewCustomer` means the name is non-empty and both readings are
/// finite, non-negative and in order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    full_name: String,
    previous_reading: f64,
    current_reading: f64,
}

impl NewCustomer {
    pub fn new(
        full_name: impl AsRef<str>,
        previous_reading: f64,
        current_reading: f64,
    ) -> DomainResult<Self> {
        let full_name = full_name.as_ref().trim();
        if full_name.is_empty() {
            return Err(DomainError::validation("full_name is required"));
        }

        let previous_reading = check_reading("previous_reading", previous_reading)?;
        let current_reading = check_reading("current_reading", current_reading)?;
        if current_reading < previous_reading {
            return Err(DomainError::validation(
                "current_reading must be greater than or equal to previous_reading",
            ));
        }

        Ok(Self {
            full_name: full_name.to_string(),
            previous_reading,
            current_reading,
        })
    }

    /// Validate text form input (e.g. form fields) before building the record.
    pub fn parse(full_name: &str, previous_reading: &str, current_reading: &str) -> DomainResult<Self> {
        if full_name.trim().is_empty() {
            return Err(DomainError::validation("full_name is required"));
        }
        let previous = parse_reading("previous_reading", previous_reading)?;
        let current = parse_reading("current_reading", current_reading)?;
        Self::new(full_name, previous, current)
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn previous_reading(&self) -> f64 {
        self.previous_reading
    }

    pub fn current_reading(&self) -> f64 {
        self.current_reading
    }
}

/// Parse one meter reading from text.
pub fn parse_reading(field: &str, raw: &str) -> DomainResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    let value = raw
        .parse::<f64>()
        .map_err(|_| DomainError::validation(format!("{field} must be a number")))?;
    check_reading(field, value)
}

fn check_reading(field: &str, value: f64) -> DomainResult<f64> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{field} must be a finite number")));
    }
    if value < 0.0 {
        return Err(DomainError::validation(format!("{field} must be non-negative")));
    }
    Ok(value)
}

/// A registered customer with its billed consumption.
///
/// Records are immutable. `consumption` and `bill_amount` are computed once
/// from the readings and the registry's tariff, and there is no way to set
/// them independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    customer_id: CustomerId,
    full_name: String,
    previous_reading: f64,
    current_reading: f64,
    consumption: f64,
    bill_amount: f64,
}

/// Registration input priced under a tariff, waiting for its id.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BilledCustomer {
    new: NewCustomer,
    consumption: f64,
    bill_amount: f64,
}

impl BilledCustomer {
    pub(crate) fn new(new: NewCustomer, tariff: &TariffTable) -> DomainResult<Self> {
        let used = consumption(new.previous_reading, new.current_reading)?;
        let bill_amount = tariff.bill(used)?;

        Ok(Self {
            new,
            consumption: used,
            bill_amount,
        })
    }

    pub(crate) fn consumption(&self) -> f64 {
        self.consumption
    }

    pub(crate) fn bill_amount(&self) -> f64 {
        self.bill_amount
    }

    pub(crate) fn into_record(self, customer_id: CustomerId) -> CustomerRecord {
        CustomerRecord {
            customer_id,
            full_name: self.new.full_name,
            previous_reading: self.new.previous_reading,
            current_reading: self.new.current_reading,
            consumption: self.consumption,
            bill_amount: self.bill_amount,
        }
    }
}

impl CustomerRecord {

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn previous_reading(&self) -> f64 {
        self.previous_reading
    }

    pub fn current_reading(&self) -> f64 {
        self.current_reading
    }

    pub fn consumption(&self) -> f64 {
        self.consumption
    }

    pub fn bill_amount(&self) -> f64 {
        self.bill_amount
    }
}

impl Entity for CustomerRecord {
    type Id = CustomerId;

    fn id(&self) -> Self::Id {
        self.customer_id
    }
}

impl Billable for CustomerRecord {
    fn consumption(&self) -> f64 {
        self.consumption
    }

    fn bill_amount(&self) -> f64 {
        self.bill_amount
    }
}
