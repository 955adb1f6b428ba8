use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use pantry_auth_types::identity::SessionToken;
use pantry_auth_types::token::validate_session_token;

use crate::domain::types::{SessionEvent, Viewer};
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::identity::ResolveViewerUseCase;

/// The request's [`Viewer`], resolved from its session token.
///
/// No token resolves to an anonymous viewer. A token that fails validation
/// is rejected with `InvalidSession` rather than silently downgraded.
pub struct CurrentViewer(pub Viewer);

impl FromRequestParts<AppState> for CurrentViewer {
    type Rejection = RecipesServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let event = match SessionToken::from_parts(parts).as_deref() {
            None => SessionEvent::SignedOut,
            Some(token) => {
                let session = validate_session_token(token, &state.session_secret).map_err(|e| {
                    tracing::debug!(error = %e, "session token rejected");
                    RecipesServiceError::InvalidSession
                })?;
                SessionEvent::SignedIn {
                    user_id: session.user_id,
                    name: session.name,
                }
            }
        };
        let usecase = ResolveViewerUseCase {
            repo: state.user_repo(),
        };
        Ok(Self(usecase.execute(event).await?))
    }
}
