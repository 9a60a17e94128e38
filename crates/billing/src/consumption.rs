//! Consumption between two meter readings.

use aquaserve_core::{DomainError, DomainResult};

/// Volume consumed between `previous` and `current` readings (cubic meters).
///
/// Meter resets are not modelled: a current reading below the previous one is
/// an [`DomainError::InvalidConsumption`], never clamped to zero.
pub fn consumption(previous: f64, current: f64) -> DomainResult<f64> {
    if !previous.is_finite() || !current.is_finite() {
        return Err(DomainError::InvalidConsumption(current - previous));
    }
    let used = current - previous;
    if used < 0.0 {
        return Err(DomainError::InvalidConsumption(used));
    }
    Ok(used)
}
