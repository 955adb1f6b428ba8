use crate::domain::repository::UserRepository;
use crate::domain::types::{SessionEvent, Viewer};
use crate::error::RecipesServiceError;

// ── ResolveViewer ────────────────────────────────────────────────────────────

/// Maps the identity provider's session state to a [`Viewer`].
///
/// The user record is fetched once per event. A signed-in user without a
/// record is a non-admin viewer named by the provider's `name` claim.
pub struct ResolveViewerUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ResolveViewerUseCase<R> {
    pub async fn execute(&self, event: SessionEvent) -> Result<Viewer, RecipesServiceError> {
        let (user_id, provider_name) = match event {
            SessionEvent::SignedOut => return Ok(Viewer::anonymous()),
            SessionEvent::SignedIn { user_id, name } => (user_id, name),
        };

        let record = self.repo.find_by_id(user_id).await?;
        let (is_admin, stored_name) = match record {
            Some(user) => (user.role.is_admin(), user.display_name),
            None => (false, None),
        };
        let display_name = stored_name
            .filter(|n| !n.trim().is_empty())
            .or(provider_name);

        Ok(Viewer::signed_in(user_id, display_name, is_admin))
    }
}
