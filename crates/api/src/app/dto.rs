use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aquaserve_billing::{TariffTable, format_money};
use aquaserve_core::{DomainError, DomainResult};
use aquaserve_customers::{MonthlySummary, NewCustomer, parse_reading};

// -------------------------
// Request DTOs
// -------------------------

/// A meter reading as sent by clients: a JSON number or numeric text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReadingInput {
    Number(f64),
    Text(String),
}

impl ReadingInput {
    fn resolve(self, field: &str) -> DomainResult<f64> {
        match self {
            ReadingInput::Number(value) => Ok(value),
            ReadingInput::Text(raw) => parse_reading(field, &raw),
        }
    }
}

/// Body of `POST /api/customers`.
///
/// Every field is optional at the wire level so a missing one is reported as a
/// validation error naming the field.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCustomerRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub previous_reading: Option<ReadingInput>,
    #[serde(default)]
    pub current_reading: Option<ReadingInput>,
}

impl CreateCustomerRequest {
    pub fn into_new_customer(self) -> DomainResult<NewCustomer> {
        let full_name = self.full_name.unwrap_or_default();
        if full_name.trim().is_empty() {
            return Err(DomainError::validation("full_name is required"));
        }
        let previous = required("previous_reading", self.previous_reading)?;
        let current = required("current_reading", self.current_reading)?;
        NewCustomer::new(full_name, previous, current)
    }
}

fn required(field: &str, input: Option<ReadingInput>) -> DomainResult<f64> {
    input
        .ok_or_else(|| DomainError::validation(format!("{field} is required")))?
        .resolve(field)
}

// -------------------------
// Response DTOs
// -------------------------

/// Body of `GET /api/reports/monthly-summary`.
#[derive(Debug, Serialize)]
pub struct MonthlySummaryResponse {
    #[serde(flatten)]
    pub report: MonthlySummary,
    pub generated_at: DateTime<Utc>,
}

/// Body of `GET /api/tariff`.
#[derive(Debug, Serialize)]
pub struct TariffResponse {
    pub currency: String,
    pub bands: Vec<TariffBandView>,
}

#[derive(Debug, Serialize)]
pub struct TariffBandView {
    pub from: f64,
    pub up_to: Option<f64>,
    pub rate: f64,
    /// Display line, e.g. `0-30 cubic meters: Ksh 25.00 per cubic meter`.
    pub label: String,
}

pub fn tariff_to_response(tariff: &TariffTable) -> TariffResponse {
    let bands = tariff
        .tiers()
        .map(|(from, band)| {
            let range = match band.up_to {
                Some(up_to) => format!("{from}-{up_to} cubic meters"),
                None => format!("Above {from} cubic meters"),
            };
            TariffBandView {
                from,
                up_to: band.up_to,
                rate: band.rate,
                label: format!(
                    "{range}: {} per cubic meter",
                    format_money(tariff.currency(), band.rate)
                ),
            }
        })
        .collect();

    TariffResponse {
        currency: tariff.currency().to_string(),
        bands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> CreateCustomerRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn numbers_and_numeric_text_are_both_accepted() {
        let new = request(serde_json::json!({
            "full_name": "Alice",
            "previous_reading": 10,
            "current_reading": "45.5",
        }))
        .into_new_customer()
        .unwrap();
        assert_eq!(new.previous_reading(), 10.0);
        assert_eq!(new.current_reading(), 45.5);
    }

    #[test]
    fn missing_fields_are_named() {
        let err = request(serde_json::json!({ "previous_reading": 1, "current_reading": 2 }))
            .into_new_customer()
            .unwrap_err();
        assert_eq!(err, DomainError::validation("full_name is required"));

        let err = request(serde_json::json!({ "full_name": "Bob", "current_reading": 2 }))
            .into_new_customer()
            .unwrap_err();
        assert_eq!(err, DomainError::validation("previous_reading is required"));

        let err = request(serde_json::json!({ "full_name": "Bob", "previous_reading": 1, "current_reading": null }))
            .into_new_customer()
            .unwrap_err();
        assert_eq!(err, DomainError::validation("current_reading is required"));
    }

    #[test]
    fn tariff_labels_follow_the_bands() {
        let view = tariff_to_response(&TariffTable::standard());
        let labels: Vec<&str> = view.bands.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "0-30 cubic meters: Ksh 25.00 per cubic meter",
                "30-60 cubic meters: Ksh 35.00 per cubic meter",
                "Above 60 cubic meters: Ksh 45.00 per cubic meter",
            ]
        );
        assert_eq!(view.currency, "Ksh");
    }
}
