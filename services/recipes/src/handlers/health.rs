use axum::extract::State;
use axum::http::StatusCode;

use pantry_core::error::AppError;

use crate::state::AppState;

/// Handler for `GET /readyz`: ready once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state
        .db
        .ping()
        .await
        .map_err(|e| AppError::Unavailable(e.into()))?;
    Ok(StatusCode::OK)
}
