//! Progressive (marginal) volume tariff.
//!
//! A tariff is an ordered list of bands. Each band charges its rate only for
//! the part of the consumption that falls inside it, so crossing a boundary
//! never re-prices the units below it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aquaserve_core::{DomainError, DomainResult};

/// One volume band of a tariff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffBand {
    /// Inclusive upper bound in cubic meters; `None` for the open-ended top band.
    #[serde(default)]
    pub up_to: Option<f64>,
    /// Price per cubic meter inside this band.
    pub rate: f64,
}

impl TariffBand {
    pub fn bounded(up_to: f64, rate: f64) -> Self {
        Self {
            up_to: Some(up_to),
            rate,
        }
    }

    pub fn unbounded(rate: f64) -> Self {
        Self { up_to: None, rate }
    }
}

/// Tariff configuration error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TariffError {
    #[error("tariff must have at least one band")]
    NoBands,

    #[error("tariff currency cannot be empty")]
    EmptyCurrency,

    #[error("band {index}: upper bound must be a finite positive number")]
    InvalidBound { index: usize },

    #[error("band {index}: upper bound must be greater than the previous band's")]
    UnorderedBound { index: usize },

    #[error("band {index}: only the last band may be unbounded")]
    UnboundedBeforeLast { index: usize },

    #[error("last band must be unbounded so every volume is billable")]
    BoundedLastBand,

    #[error("band {index}: rate must be a finite non-negative number")]
    InvalidRate { index: usize },
}

/// Validated, ordered tariff table.
///
/// Construct through [`TariffTable::new`] (or deserialize, which runs the
/// same checks). The reference configuration is [`TariffTable::standard`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTariffTable")]
pub struct TariffTable {
    currency: String,
    bands: Vec<TariffBand>,
}

#[derive(Deserialize)]
struct RawTariffTable {
    currency: String,
    bands: Vec<TariffBand>,
}

impl TryFrom<RawTariffTable> for TariffTable {
    type Error = TariffError;

    fn try_from(raw: RawTariffTable) -> Result<Self, Self::Error> {
        TariffTable::new(raw.currency, raw.bands)
    }
}

/// Charge attributed to a single band for one consumption value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCharge {
    /// Exclusive lower bound of the band (0 for the first band).
    pub from: f64,
    pub up_to: Option<f64>,
    pub rate: f64,
    /// Volume billed inside this band.
    pub volume: f64,
    pub charge: f64,
}

impl TariffTable {
    pub fn new(currency: impl Into<String>, bands: Vec<TariffBand>) -> Result<Self, TariffError> {
        let currency = currency.into();
        if currency.trim().is_empty() {
            return Err(TariffError::EmptyCurrency);
        }
        if bands.is_empty() {
            return Err(TariffError::NoBands);
        }

        let last = bands.len() - 1;
        let mut floor = 0.0_f64;
        for (index, band) in bands.iter().enumerate() {
            if !band.rate.is_finite() || band.rate < 0.0 {
                return Err(TariffError::InvalidRate { index });
            }
            match band.up_to {
                Some(bound) => {
                    if index == last {
                        return Err(TariffError::BoundedLastBand);
                    }
                    if !bound.is_finite() || bound <= 0.0 {
                        return Err(TariffError::InvalidBound { index });
                    }
                    if bound <= floor {
                        return Err(TariffError::UnorderedBound { index });
                    }
                    floor = bound;
                }
                None if index != last => return Err(TariffError::UnboundedBeforeLast { index }),
                None => {}
            }
        }

        Ok(Self { currency, bands })
    }

    /// Reference tariff: 0–30 m³ at 25, 30–60 m³ at 35, above 60 m³ at 45 (Ksh).
    pub fn standard() -> Self {
        Self {
            currency: "Ksh".to_string(),
            bands: vec![
                TariffBand::bounded(30.0, 25.0),
                TariffBand::bounded(60.0, 35.0),
                TariffBand::unbounded(45.0),
            ],
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn bands(&self) -> &[TariffBand] {
        &self.bands
    }

    /// Bands paired with their exclusive lower bound.
    pub fn tiers(&self) -> impl Iterator<Item = (f64, &TariffBand)> + '_ {
        let floors = core::iter::once(0.0).chain(self.bands.iter().filter_map(|b| b.up_to));
        floors.zip(self.bands.iter())
    }

    /// Per-band split of `consumption`. The charges sum to [`TariffTable::bill`].
    pub fn breakdown(&self, consumption: f64) -> DomainResult<Vec<BandCharge>> {
        ensure_billable(consumption)?;

        let lines: Vec<BandCharge> = self
            .tiers()
            .map(|(from, band)| {
                let ceiling = band.up_to.unwrap_or(f64::INFINITY);
                let volume = (consumption.min(ceiling) - from).max(0.0);
                BandCharge {
                    from,
                    up_to: band.up_to,
                    rate: band.rate,
                    volume,
                    charge: volume * band.rate,
                }
            })
            .collect();

        let total: f64 = lines.iter().map(|line| line.charge).sum();
        if !total.is_finite() {
            tracing::warn!(consumption, "consumption too large to bill");
            return Err(DomainError::validation(format!(
                "consumption of {consumption} cubic meters is too large to bill"
            )));
        }

        Ok(lines)
    }

    /// Amount owed for `consumption` cubic meters, at full precision.
    pub fn bill(&self, consumption: f64) -> DomainResult<f64> {
        Ok(self.breakdown(consumption)?.iter().map(|line| line.charge).sum())
    }
}

impl Default for TariffTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Compute the bill for `consumption` cubic meters under `tariff`.
///
/// Fails with [`DomainError::InvalidConsumption`] for negative or non-finite
/// input, and with [`DomainError::Validation`] when the amount itself would
/// not be a finite number.
pub fn compute_bill(tariff: &TariffTable, consumption: f64) -> DomainResult<f64> {
    tariff.bill(consumption)
}

fn ensure_billable(consumption: f64) -> DomainResult<()> {
    if !consumption.is_finite() || consumption < 0.0 {
        tracing::error!(consumption, "billing engine received an invalid consumption");
        return Err(DomainError::InvalidConsumption(consumption));
    }
    Ok(())
}
