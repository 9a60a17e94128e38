use axum::{Router, routing::get};

pub mod customers;
pub mod reports;
pub mod system;
pub mod tariff;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/customers", customers::router())
        .nest("/reports", reports::router())
        .route("/tariff", get(tariff::get_tariff))
}
