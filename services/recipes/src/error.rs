use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use pantry_domain::rating::InvalidRatingValue;

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("thread not found")]
    ThreadNotFound,
    #[error("login required")]
    LoginRequired,
    #[error("invalid session")]
    InvalidSession,
    #[error("forbidden")]
    Forbidden,
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("invalid rating")]
    InvalidRating(#[from] InvalidRatingValue),
    #[error("missing data")]
    MissingData,
    #[error("upload failed")]
    UploadFailed(#[source] anyhow::Error),
    #[error("forum unavailable")]
    ForumUnavailable(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::ThreadNotFound => "THREAD_NOT_FOUND",
            Self::LoginRequired => "LOGIN_REQUIRED",
            Self::InvalidSession => "INVALID_SESSION",
            Self::Forbidden => "FORBIDDEN",
            Self::EmptyField(_) => "EMPTY_FIELD",
            Self::InvalidRating(_) => "INVALID_RATING",
            Self::MissingData => "MISSING_DATA",
            Self::UploadFailed(_) => "UPLOAD_FAILED",
            Self::ForumUnavailable(_) => "FORUM_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::RecipeNotFound | Self::ThreadNotFound => StatusCode::NOT_FOUND,
            Self::LoginRequired | Self::InvalidSession => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::EmptyField(_) | Self::InvalidRating(_) | Self::MissingData => {
                StatusCode::BAD_REQUEST
            }
            Self::UploadFailed(_) | Self::ForumUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = "INTERNAL", "internal error"),
            Self::UploadFailed(e) | Self::ForumUnavailable(e) => {
                tracing::warn!(error = ?e, kind = self.kind(), "upstream failure")
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
