#![allow(async_fn_in_trait)]

use pantry_domain::favorite::FavoritesSet;
use pantry_domain::id::{RecipeId, UserId};
use pantry_domain::pagination::PageRequest;
use pantry_domain::rating::Rating;

use crate::domain::types::{
    Comment, ForumCategory, NewThread, Recipe, Thread, ThreadSummary, User,
};
use crate::error::RecipesServiceError;

/// Repository for recipe documents.
pub trait RecipeRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, page: PageRequest) -> Result<Vec<Recipe>, RecipesServiceError>;

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipesServiceError>;

    /// Recipes among `ids` that still exist, newest first.
    async fn find_by_ids(&self, ids: &[RecipeId]) -> Result<Vec<Recipe>, RecipesServiceError>;

    async fn create(&self, recipe: &Recipe) -> Result<(), RecipesServiceError>;

    /// Replace a recipe's editable fields. Returns `false` if it does not exist.
    async fn update(&self, recipe: &Recipe) -> Result<bool, RecipesServiceError>;

    /// Delete a recipe with its ratings and comments. Returns `true` if a row was deleted.
    async fn delete(&self, id: RecipeId) -> Result<bool, RecipesServiceError>;
}

/// Repository for per-user ratings, keyed by (recipe, user).
pub trait RatingRepository: Send + Sync {
    async fn list_for_recipe(&self, recipe_id: RecipeId)
    -> Result<Vec<Rating>, RecipesServiceError>;

    /// Insert or overwrite the user's rating.
    async fn upsert(&self, recipe_id: RecipeId, rating: Rating) -> Result<(), RecipesServiceError>;
}

/// Repository for favorite sets, one row per element.
pub trait FavoriteRepository: Send + Sync {
    async fn list(&self, user_id: UserId) -> Result<FavoritesSet, RecipesServiceError>;

    async fn contains(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, RecipesServiceError>;

    /// Add one element if absent. Returns `true` if it was inserted.
    async fn add(&self, user_id: UserId, recipe_id: RecipeId) -> Result<bool, RecipesServiceError>;

    /// Remove one element if present. Returns `true` if it was removed.
    async fn remove(&self, user_id: UserId, recipe_id: RecipeId)
    -> Result<bool, RecipesServiceError>;
}

/// Append-only comment log.
pub trait CommentRepository: Send + Sync {
    /// Full list, newest first.
    async fn list_for_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<Comment>, RecipesServiceError>;

    async fn append(&self, comment: &Comment) -> Result<(), RecipesServiceError>;
}

/// Read-only access to user/role records.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RecipesServiceError>;
}

/// Blob storage for recipe images.
pub trait BlobStore: Send + Sync {
    /// Store `data` at `path` and return its durable public URL.
    ///
    /// Any failure, including an oversized payload, is `UploadFailed`.
    async fn put(&self, path: &str, data: &[u8]) -> Result<String, RecipesServiceError>;
}

/// Port for the external forum REST service.
pub trait ForumGateway: Send + Sync {
    async fn categories(&self) -> Result<Vec<ForumCategory>, RecipesServiceError>;

    async fn threads_in_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<ThreadSummary>, RecipesServiceError>;

    async fn thread(&self, thread_id: &str) -> Result<Thread, RecipesServiceError>;

    async fn create_thread(&self, thread: &NewThread) -> Result<(), RecipesServiceError>;

    async fn add_comment(&self, thread_id: &str, content: &str)
    -> Result<(), RecipesServiceError>;
}

/// Signals live subscribers that a recipe's comments or ratings changed.
pub trait ChangeNotifier: Send + Sync {
    fn comments_changed(&self, recipe_id: RecipeId);
    fn rating_changed(&self, recipe_id: RecipeId);
}
