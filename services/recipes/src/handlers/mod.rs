pub mod comment;
pub mod favorite;
pub mod forum;
pub mod health;
pub mod live;
pub mod me;
pub mod rating;
pub mod recipe;
pub mod viewer;

use pantry_domain::id::RecipeId;

use crate::error::RecipesServiceError;

/// Parse a recipe id path segment. A malformed id names no recipe.
pub(crate) fn parse_recipe_id(raw: &str) -> Result<RecipeId, RecipesServiceError> {
    raw.parse().map_err(|_| RecipesServiceError::RecipeNotFound)
}
