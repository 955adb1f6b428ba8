use pantry_domain::favorite::{FavoriteChange, is_favorite};
use pantry_domain::id::RecipeId;

use crate::domain::repository::{FavoriteRepository, RecipeRepository};
use crate::domain::types::{Recipe, Viewer};
use crate::error::RecipesServiceError;

/// Apply one single-element change through the store's atomic primitive.
async fn apply_change<F: FavoriteRepository>(
    repo: &F,
    viewer: &Viewer,
    change: FavoriteChange,
) -> Result<bool, RecipesServiceError> {
    let user_id = viewer.require_user()?;
    match change {
        FavoriteChange::Add(recipe_id) => repo.add(user_id, recipe_id).await,
        FavoriteChange::Remove(recipe_id) => repo.remove(user_id, recipe_id).await,
    }
}

async fn ensure_recipe_exists<P: RecipeRepository>(
    recipes: &P,
    recipe_id: RecipeId,
) -> Result<(), RecipesServiceError> {
    match recipes.find_by_id(recipe_id).await? {
        Some(_) => Ok(()),
        None => Err(RecipesServiceError::RecipeNotFound),
    }
}

// ── AddFavorite ──────────────────────────────────────────────────────────────

pub struct AddFavoriteUseCase<P: RecipeRepository, F: FavoriteRepository> {
    pub recipes: P,
    pub repo: F,
}

impl<P: RecipeRepository, F: FavoriteRepository> AddFavoriteUseCase<P, F> {
    /// Idempotent. Returns `true` if the recipe was not already a favorite.
    pub async fn execute(
        &self,
        viewer: &Viewer,
        recipe_id: RecipeId,
    ) -> Result<bool, RecipesServiceError> {
        viewer.require_user()?;
        ensure_recipe_exists(&self.recipes, recipe_id).await?;
        apply_change(&self.repo, viewer, FavoriteChange::Add(recipe_id)).await
    }
}

// ── RemoveFavorite ───────────────────────────────────────────────────────────

pub struct RemoveFavoriteUseCase<F: FavoriteRepository> {
    pub repo: F,
}

impl<F: FavoriteRepository> RemoveFavoriteUseCase<F> {
    /// Idempotent. Returns `true` if the recipe was a favorite.
    pub async fn execute(
        &self,
        viewer: &Viewer,
        recipe_id: RecipeId,
    ) -> Result<bool, RecipesServiceError> {
        apply_change(&self.repo, viewer, FavoriteChange::Remove(recipe_id)).await
    }
}

// ── ToggleFavorite ───────────────────────────────────────────────────────────

pub struct ToggleFavoriteUseCase<P: RecipeRepository, F: FavoriteRepository> {
    pub recipes: P,
    pub repo: F,
}

impl<P: RecipeRepository, F: FavoriteRepository> ToggleFavoriteUseCase<P, F> {
    /// Flip membership of one recipe and return the new membership.
    ///
    /// Reads membership of this element only and writes this element only;
    /// other elements of the set are never rewritten.
    pub async fn execute(
        &self,
        viewer: &Viewer,
        recipe_id: RecipeId,
    ) -> Result<bool, RecipesServiceError> {
        let user_id = viewer.require_user()?;
        let currently_favorite = self.repo.contains(user_id, recipe_id).await?;
        let change = FavoriteChange::toggle(currently_favorite, recipe_id);
        if change.resulting_membership() {
            ensure_recipe_exists(&self.recipes, recipe_id).await?;
        }
        apply_change(&self.repo, viewer, change).await?;
        tracing::debug!(%recipe_id, %user_id, favorite = change.resulting_membership(), "favorite toggled");
        Ok(change.resulting_membership())
    }
}

// ── IsFavorite ───────────────────────────────────────────────────────────────

pub struct IsFavoriteUseCase<F: FavoriteRepository> {
    pub repo: F,
}

impl<F: FavoriteRepository> IsFavoriteUseCase<F> {
    /// Always `false` for an anonymous viewer.
    pub async fn execute(
        &self,
        viewer: &Viewer,
        recipe_id: RecipeId,
    ) -> Result<bool, RecipesServiceError> {
        let Some(user_id) = viewer.user_id else {
            return Ok(false);
        };
        let set = self.repo.list(user_id).await?;
        Ok(is_favorite(&set, recipe_id))
    }
}

// ── ListFavoriteRecipes ──────────────────────────────────────────────────────

pub struct ListFavoriteRecipesUseCase<P: RecipeRepository, F: FavoriteRepository> {
    pub recipes: P,
    pub repo: F,
}

impl<P: RecipeRepository, F: FavoriteRepository> ListFavoriteRecipesUseCase<P, F> {
    /// Resolve the viewer's favorite set to recipes, skipping ids whose
    /// recipe no longer exists.
    pub async fn execute(&self, viewer: &Viewer) -> Result<Vec<Recipe>, RecipesServiceError> {
        let user_id = viewer.require_user()?;
        let set = self.repo.list(user_id).await?;
        if set.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<RecipeId> = set.iter().collect();
        self.recipes.find_by_ids(&ids).await
    }
}
