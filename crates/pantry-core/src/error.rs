use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Cross-cutting HTTP errors raised outside any service's own error enum
/// (router fallback, readiness probe).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error("service unavailable")]
    Unavailable(#[source] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Unavailable(_) => "UNAVAILABLE",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        if let Self::Unavailable(ref e) = self {
            tracing::warn!(error = %e, kind = "UNAVAILABLE", "dependency unavailable");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Router fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
