use pantry_domain::id::RecipeId;
use pantry_domain::rating::{AggregateRating, Rating, RatingValue, compute_aggregate_rating};

use crate::domain::repository::{ChangeNotifier, RatingRepository, RecipeRepository};
use crate::domain::types::{RatingSummary, Viewer};
use crate::error::RecipesServiceError;

// ── GetRatingSummary ─────────────────────────────────────────────────────────

pub struct GetRatingSummaryUseCase<R: RatingRepository> {
    pub repo: R,
}

impl<R: RatingRepository> GetRatingSummaryUseCase<R> {
    pub async fn execute(
        &self,
        viewer: &Viewer,
        recipe_id: RecipeId,
    ) -> Result<RatingSummary, RecipesServiceError> {
        let ratings = self.repo.list_for_recipe(recipe_id).await?;
        let own_rating = viewer.user_id.and_then(|user_id| {
            ratings
                .iter()
                .find(|r| r.user_id == user_id)
                .map(|r| r.value)
        });
        Ok(RatingSummary {
            aggregate: compute_aggregate_rating(&ratings),
            own_rating,
        })
    }
}

// ── RateRecipe ───────────────────────────────────────────────────────────────

pub struct RateRecipeUseCase<P: RecipeRepository, R: RatingRepository, N: ChangeNotifier> {
    pub recipes: P,
    pub repo: R,
    pub notifier: N,
}

impl<P: RecipeRepository, R: RatingRepository, N: ChangeNotifier> RateRecipeUseCase<P, R, N> {
    /// Upsert the viewer's rating and return the aggregate recomputed from
    /// a fresh read of the rating set.
    pub async fn execute(
        &self,
        viewer: &Viewer,
        recipe_id: RecipeId,
        stars: f64,
    ) -> Result<AggregateRating, RecipesServiceError> {
        let user_id = viewer.require_user()?;
        let value = RatingValue::try_from_f64(stars)?;

        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }

        self.repo.upsert(recipe_id, Rating { user_id, value }).await?;
        let ratings = self.repo.list_for_recipe(recipe_id).await?;
        let aggregate = compute_aggregate_rating(&ratings);

        tracing::debug!(%recipe_id, %user_id, stars = value.stars(), count = aggregate.count, "recipe rated");
        self.notifier.rating_changed(recipe_id);
        Ok(aggregate)
    }
}
