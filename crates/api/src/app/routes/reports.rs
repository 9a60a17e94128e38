use std::sync::Arc;

use axum::{Json, Router, extract::Extension, routing::get};
use chrono::Utc;

use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/monthly-summary", get(monthly_summary))
}

/// `GetMonthlySummary`: summary and customer list come from the same snapshot.
pub async fn monthly_summary(
    Extension(services): Extension<Arc<AppServices>>,
) -> Json<dto::MonthlySummaryResponse> {
    Json(dto::MonthlySummaryResponse {
        report: services.registry().monthly_summary(),
        generated_at: Utc::now(),
    })
}
