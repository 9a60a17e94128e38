use axum::http::Request;
use tower_http::cors::CorsLayer;
use tower_http::trace::{HttpMakeClassifier, MakeSpan, TraceLayer};
use tracing::Span;
use uuid::Uuid;

/// Opens one `http_request` span per request, tagged with a fresh request id.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "http_request",
            request_id = %Uuid::now_v7(),
            method = %request.method(),
            uri = %request.uri(),
        )
    }
}

/// Request/response tracing for every route.
pub fn trace_layer() -> TraceLayer<HttpMakeClassifier, RequestSpan> {
    TraceLayer::new_for_http().make_span_with(RequestSpan)
}

/// The dashboard is served from a different origin than the API.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
