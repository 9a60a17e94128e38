use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use aquaserve_core::CustomerId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route("/:id", get(get_customer))
}

/// `CreateCustomer`: not idempotent, every accepted call creates a new record.
pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::CreateCustomerRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "customer registration rejected: bad body");
            return errors::json_rejection_to_response(rejection);
        }
    };

    let new = match body.into_new_customer() {
        Ok(new) => new,
        Err(e) => {
            tracing::warn!(error = %e, "customer registration rejected");
            return errors::domain_error_to_response(e);
        }
    };

    match services.registry().register_new(new) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.registry().get(id) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_customers(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.registry().list())
}
