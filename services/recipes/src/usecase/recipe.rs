use chrono::Utc;

use pantry_domain::favorite::is_favorite;
use pantry_domain::id::RecipeId;
use pantry_domain::pagination::PageRequest;
use pantry_domain::rating::compute_aggregate_rating;
use pantry_domain::recipe::{image_blob_path, video_embed_url};

use crate::domain::repository::{
    BlobStore, ChangeNotifier, FavoriteRepository, RatingRepository, RecipeRepository,
};
use crate::domain::types::{ImageUpload, Recipe, RecipeDetail, RecipeDraft, Viewer};
use crate::error::RecipesServiceError;

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Trim required text fields and reject empty ones.
fn validate_draft(mut draft: RecipeDraft) -> Result<RecipeDraft, RecipesServiceError> {
    draft.title = draft.title.trim().to_owned();
    draft.description = draft.description.trim().to_owned();
    if draft.title.is_empty() {
        return Err(RecipesServiceError::EmptyField("title"));
    }
    if draft.description.is_empty() {
        return Err(RecipesServiceError::EmptyField("description"));
    }
    draft.video_url = non_blank(draft.video_url);
    Ok(draft)
}

async fn upload_image<B: BlobStore>(
    blobs: &B,
    recipe_id: RecipeId,
    image: &ImageUpload,
) -> Result<String, RecipesServiceError> {
    let path = image_blob_path(recipe_id, &image.file_name);
    let url = blobs.put(&path, &image.data).await?;
    tracing::info!(%recipe_id, %path, bytes = image.data.len(), "recipe image uploaded");
    Ok(url)
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<P: RecipeRepository> {
    pub repo: P,
}

impl<P: RecipeRepository> ListRecipesUseCase<P> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Recipe>, RecipesServiceError> {
        self.repo.list(page.clamped()).await
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<P: RecipeRepository, R: RatingRepository, F: FavoriteRepository> {
    pub repo: P,
    pub ratings: R,
    pub favorites: F,
}

impl<P: RecipeRepository, R: RatingRepository, F: FavoriteRepository> GetRecipeUseCase<P, R, F> {
    pub async fn execute(
        &self,
        viewer: &Viewer,
        id: RecipeId,
    ) -> Result<RecipeDetail, RecipesServiceError> {
        let recipe = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;

        let ratings = self.ratings.list_for_recipe(id).await?;
        let (is_favorite, own_rating) = match viewer.user_id {
            Some(user_id) => {
                let set = self.favorites.list(user_id).await?;
                let own = ratings
                    .iter()
                    .find(|r| r.user_id == user_id)
                    .map(|r| r.value);
                (is_favorite(&set, id), own)
            }
            None => (false, None),
        };
        let video_embed_url = recipe.video_url.as_deref().and_then(video_embed_url);

        Ok(RecipeDetail {
            rating: compute_aggregate_rating(&ratings),
            is_favorite,
            own_rating,
            video_embed_url,
            recipe,
        })
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<P: RecipeRepository, B: BlobStore> {
    pub repo: P,
    pub blobs: B,
}

impl<P: RecipeRepository, B: BlobStore> CreateRecipeUseCase<P, B> {
    /// Admin only. An attached image is uploaded before the record is
    /// written; if the upload fails nothing is written.
    pub async fn execute(
        &self,
        viewer: &Viewer,
        draft: RecipeDraft,
        image: Option<ImageUpload>,
    ) -> Result<Recipe, RecipesServiceError> {
        viewer.require_admin()?;
        let draft = validate_draft(draft)?;

        let id = RecipeId::generate();
        let image_url = match &image {
            Some(image) => Some(upload_image(&self.blobs, id, image).await?),
            None => non_blank(draft.image_url),
        };

        let now = Utc::now();
        let recipe = Recipe {
            id,
            title: draft.title,
            description: draft.description,
            image_url,
            video_url: draft.video_url,
            ingredients: draft.ingredients,
            steps: draft.steps,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&recipe).await?;
        tracing::info!(recipe_id = %recipe.id, "recipe created");
        Ok(recipe)
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<P: RecipeRepository, B: BlobStore> {
    pub repo: P,
    pub blobs: B,
}

impl<P: RecipeRepository, B: BlobStore> UpdateRecipeUseCase<P, B> {
    /// Admin only. Replaces all editable fields. Without a new image, a
    /// submitted `image_url` replaces the current one (blank clears it) and
    /// an omitted one keeps it.
    pub async fn execute(
        &self,
        viewer: &Viewer,
        id: RecipeId,
        draft: RecipeDraft,
        image: Option<ImageUpload>,
    ) -> Result<Recipe, RecipesServiceError> {
        viewer.require_admin()?;
        let draft = validate_draft(draft)?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;

        let image_url = match &image {
            Some(image) => Some(upload_image(&self.blobs, id, image).await?),
            None => match draft.image_url {
                Some(url) => non_blank(Some(url)),
                None => existing.image_url,
            },
        };

        let recipe = Recipe {
            id,
            title: draft.title,
            description: draft.description,
            image_url,
            video_url: draft.video_url,
            ingredients: draft.ingredients,
            steps: draft.steps,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        if !self.repo.update(&recipe).await? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        tracing::info!(recipe_id = %id, "recipe updated");
        Ok(recipe)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<P: RecipeRepository, N: ChangeNotifier> {
    pub repo: P,
    pub notifier: N,
}

impl<P: RecipeRepository, N: ChangeNotifier> DeleteRecipeUseCase<P, N> {
    /// Admin only. Ratings and comments go with the recipe, so live
    /// subscribers of both are woken to re-read.
    pub async fn execute(&self, viewer: &Viewer, id: RecipeId) -> Result<(), RecipesServiceError> {
        viewer.require_admin()?;
        let deleted = self.repo.delete(id).await?;
        if !deleted {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        tracing::info!(recipe_id = %id, "recipe deleted");
        self.notifier.comments_changed(id);
        self.notifier.rating_changed(id);
        Ok(())
    }
}
