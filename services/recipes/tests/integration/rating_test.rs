use chrono::Utc;

use pantry_domain::id::RecipeId;
use pantry_domain::rating::RatingValue;
use pantry_recipes::domain::types::Viewer;
use pantry_recipes::error::RecipesServiceError;
use pantry_recipes::infra::feed::{ChangeFeed, FeedTopic};
use pantry_recipes::usecase::rating::{GetRatingSummaryUseCase, RateRecipeUseCase};

use crate::helpers::{MemRatingRepo, MemRecipeRepo, member, next_snapshot, test_recipe};

fn rate_usecase(
    recipes: &MemRecipeRepo,
    ratings: &MemRatingRepo,
    feed: &ChangeFeed,
) -> RateRecipeUseCase<MemRecipeRepo, MemRatingRepo, ChangeFeed> {
    RateRecipeUseCase {
        recipes: recipes.clone(),
        repo: ratings.clone(),
        notifier: feed.clone(),
    }
}

// ── RateRecipeUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_average_ratings_across_users() {
    let recipe = test_recipe("Shakshuka", Utc::now());
    let recipes = MemRecipeRepo::with(vec![recipe.clone()]);
    let ratings = MemRatingRepo::default();
    let uc = rate_usecase(&recipes, &ratings, &ChangeFeed::new());

    uc.execute(&member("ada"), recipe.id, 4.0).await.unwrap();
    let aggregate = uc.execute(&member("bo"), recipe.id, 5.0).await.unwrap();

    assert_eq!(aggregate.count, 2);
    assert_eq!(aggregate.average, 4.5);
}

#[tokio::test]
async fn should_overwrite_rating_from_same_user() {
    let recipe = test_recipe("Shakshuka", Utc::now());
    let recipes = MemRecipeRepo::with(vec![recipe.clone()]);
    let ratings = MemRatingRepo::default();
    let uc = rate_usecase(&recipes, &ratings, &ChangeFeed::new());
    let viewer = member("ada");

    uc.execute(&viewer, recipe.id, 1.0).await.unwrap();
    uc.execute(&member("bo"), recipe.id, 3.0).await.unwrap();
    let aggregate = uc.execute(&viewer, recipe.id, 5.0).await.unwrap();

    assert_eq!(aggregate.count, 2);
    assert_eq!(aggregate.average, 4.0);
    assert_eq!(ratings.ratings.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_keep_every_rating_when_users_rate_concurrently() {
    let recipe = test_recipe("Shakshuka", Utc::now());
    let recipes = MemRecipeRepo::with(vec![recipe.clone()]);
    let ratings = MemRatingRepo::default();
    let feed = ChangeFeed::new();
    let (a, b, c) = (member("a"), member("b"), member("c"));
    let (uc_a, uc_b, uc_c) = (
        rate_usecase(&recipes, &ratings, &feed),
        rate_usecase(&recipes, &ratings, &feed),
        rate_usecase(&recipes, &ratings, &feed),
    );

    let (ra, rb, rc) = tokio::join!(
        uc_a.execute(&a, recipe.id, 2.0),
        uc_b.execute(&b, recipe.id, 3.0),
        uc_c.execute(&c, recipe.id, 4.0),
    );
    ra.unwrap();
    rb.unwrap();
    rc.unwrap();

    let summary = GetRatingSummaryUseCase {
        repo: ratings.clone(),
    }
    .execute(&Viewer::anonymous(), recipe.id)
    .await
    .unwrap();
    assert_eq!(summary.aggregate.count, 3);
    assert_eq!(summary.aggregate.average, 3.0);
}

#[tokio::test]
async fn should_reject_off_grid_values_without_writing() {
    let recipe = test_recipe("Shakshuka", Utc::now());
    let recipes = MemRecipeRepo::with(vec![recipe.clone()]);
    let ratings = MemRatingRepo::default();
    let uc = rate_usecase(&recipes, &ratings, &ChangeFeed::new());

    for stars in [4.2, -0.5, 5.5, f64::NAN] {
        let result = uc.execute(&member("ada"), recipe.id, stars).await;
        assert!(
            matches!(result, Err(RecipesServiceError::InvalidRating(_))),
            "{stars} accepted"
        );
    }
    assert!(ratings.ratings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_not_rate_missing_recipe() {
    let ratings = MemRatingRepo::default();
    let uc = rate_usecase(&MemRecipeRepo::default(), &ratings, &ChangeFeed::new());

    let result = uc.execute(&member("ada"), RecipeId::generate(), 3.0).await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
    assert!(ratings.ratings.lock().unwrap().is_empty());
}

// ── Live rating ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_push_new_aggregate_to_live_subscribers() {
    let recipe = test_recipe("Shakshuka", Utc::now());
    let recipe_id = recipe.id;
    let recipes = MemRecipeRepo::with(vec![recipe]);
    let ratings = MemRatingRepo::default();
    let feed = ChangeFeed::new();
    let viewer = member("ada");

    let loader_repo = ratings.clone();
    let loader_viewer = viewer.clone();
    let mut live = feed.subscribe(recipe_id, FeedTopic::Rating, move || {
        let usecase = GetRatingSummaryUseCase {
            repo: loader_repo.clone(),
        };
        let viewer = loader_viewer.clone();
        async move { usecase.execute(&viewer, recipe_id).await }
    });

    let initial = next_snapshot(&mut live).await;
    assert_eq!(initial.aggregate.count, 0);
    assert!(initial.own_rating.is_none());

    rate_usecase(&recipes, &ratings, &feed)
        .execute(&viewer, recipe_id, 3.5)
        .await
        .unwrap();

    let updated = next_snapshot(&mut live).await;
    assert_eq!(updated.aggregate.count, 1);
    assert_eq!(updated.aggregate.average, 3.5);
    assert_eq!(updated.own_rating, RatingValue::try_from_f64(3.5).ok());
}
