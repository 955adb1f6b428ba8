use axum::http::StatusCode;

/// Handler for `GET /healthz`: liveness check.
///
/// Readiness depends on each service's own dependencies, so `/readyz` is
/// defined per service.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
