use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use aquaserve_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::CapacityExceeded { capacity } => json_error(
            StatusCode::CONFLICT,
            "capacity_exceeded",
            format!("registry is full: at most {capacity} customers can be registered"),
        ),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "customer not found"),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvalidConsumption(consumption) => {
            tracing::error!(consumption, "billing invariant violated behind the registry");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
        }
    }
}

/// Malformed or mistyped bodies are validation failures like any other.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

/// Error body: `error` is the human-readable message the dashboard shows,
/// `code` is stable for programmatic callers.
pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "code": code,
        })),
    )
        .into_response()
}
