//! Presentation helpers for monetary amounts.
//!
//! The engine never rounds; these are for the edges (logs, labels, reports).

/// Render an amount with exactly two decimal places.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Render an amount prefixed with its currency label, e.g. `Ksh 925.00`.
pub fn format_money(currency: &str, amount: f64) -> String {
    format!("{currency} {}", format_amount(amount))
}
