use std::sync::Arc;

use axum::{Json, extract::Extension};

use crate::app::dto;
use crate::app::services::AppServices;

pub async fn get_tariff(Extension(services): Extension<Arc<AppServices>>) -> Json<dto::TariffResponse> {
    Json(dto::tariff_to_response(services.registry().tariff()))
}
