use chrono::Utc;

use pantry_domain::id::{CommentId, RecipeId};

use crate::domain::repository::{ChangeNotifier, CommentRepository, RecipeRepository};
use crate::domain::types::{Comment, Viewer, sort_newest_first};
use crate::error::RecipesServiceError;

// ── ListComments ─────────────────────────────────────────────────────────────

pub struct ListCommentsUseCase<C: CommentRepository> {
    pub repo: C,
}

impl<C: CommentRepository> ListCommentsUseCase<C> {
    /// Full list, newest first. Not paginated.
    pub async fn execute(&self, recipe_id: RecipeId) -> Result<Vec<Comment>, RecipesServiceError> {
        let mut comments = self.repo.list_for_recipe(recipe_id).await?;
        sort_newest_first(&mut comments);
        Ok(comments)
    }
}

// ── AddComment ───────────────────────────────────────────────────────────────

pub struct AddCommentUseCase<P: RecipeRepository, C: CommentRepository, N: ChangeNotifier> {
    pub recipes: P,
    pub repo: C,
    pub notifier: N,
}

impl<P: RecipeRepository, C: CommentRepository, N: ChangeNotifier> AddCommentUseCase<P, C, N> {
    pub async fn execute(
        &self,
        viewer: &Viewer,
        recipe_id: RecipeId,
        content: &str,
    ) -> Result<Comment, RecipesServiceError> {
        let user_id = viewer.require_user()?;
        let content = content.trim();
        if content.is_empty() {
            return Err(RecipesServiceError::EmptyField("content"));
        }
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }

        let comment = Comment {
            id: CommentId::generate(),
            recipe_id,
            user_id,
            display_name: viewer.author_name().to_owned(),
            content: content.to_owned(),
            created_at: Utc::now(),
        };
        self.repo.append(&comment).await?;
        self.notifier.comments_changed(recipe_id);
        Ok(comment)
    }
}
