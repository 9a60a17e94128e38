//! Billing engine: tiered water tariff, consumption and registry-wide reporting.
//!
//! Everything here is a pure, deterministic function of its inputs (no IO, no
//! storage, no clocks). Amounts are carried at full `f64` precision; rounding
//! to two decimals happens only when rendering (see [`money`]).

pub mod consumption;
pub mod money;
pub mod report;
pub mod tariff;

pub use consumption::consumption;
pub use money::{format_amount, format_money};
pub use report::{Billable, SummaryReport, aggregate};
pub use tariff::{BandCharge, TariffBand, TariffError, TariffTable, compute_bill};
