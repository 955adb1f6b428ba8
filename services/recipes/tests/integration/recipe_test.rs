use bytes::Bytes;
use chrono::{Duration, Utc};

use pantry_domain::pagination::PageRequest;
use pantry_domain::rating::{Rating, RatingValue};
use pantry_recipes::domain::repository::{FavoriteRepository, RatingRepository};
use pantry_recipes::domain::types::{ImageUpload, Recipe, RecipeDraft, Viewer};
use pantry_recipes::error::RecipesServiceError;
use pantry_recipes::infra::blob::FilesystemBlobStore;
use pantry_recipes::infra::feed::{ChangeFeed, FeedTopic};
use pantry_recipes::usecase::rating::GetRatingSummaryUseCase;
use pantry_recipes::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase,
    UpdateRecipeUseCase,
};

use crate::helpers::{
    MemFavoriteRepo, MemRatingRepo, MemRecipeRepo, TEST_MEDIA_URL, admin, blob_store, member,
    next_snapshot, test_recipe,
};

fn draft(title: &str) -> RecipeDraft {
    RecipeDraft {
        title: title.to_owned(),
        description: "Weeknight dinner".to_owned(),
        image_url: None,
        video_url: Some("https://www.youtube.com/watch?v=abc123".to_owned()),
        ingredients: vec!["rice".to_owned(), "eggs".to_owned()],
        steps: vec!["fry".to_owned()],
    }
}

fn image(file_name: &str, data: &'static [u8]) -> ImageUpload {
    ImageUpload {
        file_name: file_name.to_owned(),
        data: Bytes::from_static(data),
    }
}

fn create_usecase(
    recipes: &MemRecipeRepo,
    blobs: &FilesystemBlobStore,
) -> CreateRecipeUseCase<MemRecipeRepo, FilesystemBlobStore> {
    CreateRecipeUseCase {
        repo: recipes.clone(),
        blobs: blobs.clone(),
    }
}

// ── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_upload_image_before_storing_recipe() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = blob_store(dir.path(), 1024).await;
    let recipes = MemRecipeRepo::default();

    let recipe = create_usecase(&recipes, &blobs)
        .execute(
            &admin(),
            draft("Fried rice"),
            Some(image("my photo.jpg", b"jpeg")),
        )
        .await
        .unwrap();

    let expected_url = format!("{TEST_MEDIA_URL}/recipes/{}/my_photo.jpg", recipe.id);
    assert_eq!(recipe.image_url.as_deref(), Some(expected_url.as_str()));
    let stored = std::fs::read(blobs.root().join(format!("recipes/{}/my_photo.jpg", recipe.id)));
    assert_eq!(stored.unwrap(), b"jpeg");
    assert_eq!(recipes.get(recipe.id), Some(recipe));
}

#[tokio::test]
async fn should_store_nothing_when_upload_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = blob_store(dir.path(), 2).await;
    let recipes = MemRecipeRepo::default();

    let result = create_usecase(&recipes, &blobs)
        .execute(
            &admin(),
            draft("Fried rice"),
            Some(image("big.jpg", b"too large")),
        )
        .await;

    assert!(matches!(result, Err(RecipesServiceError::UploadFailed(_))));
    assert!(recipes.recipes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_recipe_edits_from_non_admins() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = blob_store(dir.path(), 1024).await;
    let recipes = MemRecipeRepo::default();
    let uc = create_usecase(&recipes, &blobs);

    let anonymous = uc
        .execute(&Viewer::anonymous(), draft("Fried rice"), None)
        .await;
    assert!(matches!(anonymous, Err(RecipesServiceError::LoginRequired)));
    let standard = uc.execute(&member("ada"), draft("Fried rice"), None).await;
    assert!(matches!(standard, Err(RecipesServiceError::Forbidden)));
    assert!(recipes.recipes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_blank_title() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = blob_store(dir.path(), 1024).await;
    let result = create_usecase(&MemRecipeRepo::default(), &blobs)
        .execute(&admin(), draft("  "), None)
        .await;
    assert!(matches!(result, Err(RecipesServiceError::EmptyField("title"))));
}

// ── Update / Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_existing_image_when_edit_has_none() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = blob_store(dir.path(), 1024).await;
    let mut original = test_recipe("Curry", Utc::now() - Duration::hours(1));
    original.image_url = Some(format!("{TEST_MEDIA_URL}/recipes/{}/old.jpg", original.id));
    let recipes = MemRecipeRepo::with(vec![original.clone()]);

    let updated = UpdateRecipeUseCase {
        repo: recipes.clone(),
        blobs: blobs.clone(),
    }
    .execute(&admin(), original.id, draft("Green curry"), None)
    .await
    .unwrap();

    assert_eq!(updated.title, "Green curry");
    assert_eq!(updated.image_url, original.image_url);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);
    assert_eq!(recipes.get(original.id), Some(updated));
}

#[tokio::test]
async fn should_report_missing_recipe_on_update_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = blob_store(dir.path(), 1024).await;
    let recipes = MemRecipeRepo::default();
    let missing = test_recipe("Ghost", Utc::now()).id;

    let update = UpdateRecipeUseCase {
        repo: recipes.clone(),
        blobs,
    }
    .execute(&admin(), missing, draft("Ghost"), None)
    .await;
    assert!(matches!(update, Err(RecipesServiceError::RecipeNotFound)));

    let delete = DeleteRecipeUseCase {
        repo: recipes.clone(),
        notifier: ChangeFeed::new(),
    }
    .execute(&admin(), missing)
    .await;
    assert!(matches!(delete, Err(RecipesServiceError::RecipeNotFound)));
}

#[tokio::test]
async fn should_delete_recipe_as_admin() {
    let recipe = test_recipe("Curry", Utc::now());
    let recipes = MemRecipeRepo::with(vec![recipe.clone()]);
    DeleteRecipeUseCase {
        repo: recipes.clone(),
        notifier: ChangeFeed::new(),
    }
    .execute(&admin(), recipe.id)
    .await
    .unwrap();
    assert!(recipes.get(recipe.id).is_none());
}

#[tokio::test]
async fn should_refresh_live_rating_after_delete() {
    let recipe = test_recipe("Gumbo", Utc::now());
    let recipe_id = recipe.id;
    let recipes = MemRecipeRepo::with(vec![recipe]);
    let ratings = MemRatingRepo::default();
    let feed = ChangeFeed::new();
    ratings
        .upsert(
            recipe_id,
            Rating {
                user_id: member("ada").user_id.unwrap(),
                value: RatingValue::try_from_f64(4.0).unwrap(),
            },
        )
        .await
        .unwrap();

    let loader_repo = ratings.clone();
    let mut live = feed.subscribe(recipe_id, FeedTopic::Rating, move || {
        let usecase = GetRatingSummaryUseCase {
            repo: loader_repo.clone(),
        };
        async move { usecase.execute(&Viewer::anonymous(), recipe_id).await }
    });
    assert_eq!(next_snapshot(&mut live).await.aggregate.count, 1);

    // the database drops a recipe's ratings with it
    ratings.ratings.lock().unwrap().clear();
    DeleteRecipeUseCase {
        repo: recipes.clone(),
        notifier: feed.clone(),
    }
    .execute(&admin(), recipe_id)
    .await
    .unwrap();

    let after = next_snapshot(&mut live).await;
    assert_eq!(after.aggregate.count, 0);
    assert_eq!(after.aggregate.average, 0.0);
}

// ── Read ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_page_recipes_newest_first() {
    let now = Utc::now();
    let recipes = MemRecipeRepo::with(
        (0..5)
            .map(|i| test_recipe(&format!("r{i}"), now - Duration::minutes(i)))
            .collect(),
    );
    let uc = ListRecipesUseCase {
        repo: recipes.clone(),
    };

    let page = |page| PageRequest { per_page: 2, page };
    let titles = |list: Vec<Recipe>| {
        list.into_iter().map(|r| r.title).collect::<Vec<_>>()
    };
    assert_eq!(titles(uc.execute(page(1)).await.unwrap()), vec!["r0", "r1"]);
    assert_eq!(titles(uc.execute(page(3)).await.unwrap()), vec!["r4"]);
    assert!(uc.execute(page(4)).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_build_detail_for_signed_in_viewer() {
    let mut recipe = test_recipe("Curry", Utc::now());
    recipe.video_url = Some("https://www.youtube.com/watch?v=abc123".to_owned());
    let recipes = MemRecipeRepo::with(vec![recipe.clone()]);
    let ratings = MemRatingRepo::default();
    let favorites = MemFavoriteRepo::default();
    let viewer = member("ada");
    let user_id = viewer.user_id.unwrap();

    favorites.add(user_id, recipe.id).await.unwrap();
    let value = RatingValue::try_from_f64(4.5).unwrap();
    ratings
        .upsert(recipe.id, Rating { user_id, value })
        .await
        .unwrap();

    let uc = GetRecipeUseCase {
        repo: recipes,
        ratings,
        favorites,
    };
    let detail = uc.execute(&viewer, recipe.id).await.unwrap();
    assert!(detail.is_favorite);
    assert_eq!(detail.own_rating, Some(value));
    assert_eq!(detail.rating.count, 1);
    assert_eq!(
        detail.video_embed_url.as_deref(),
        Some("https://www.youtube.com/embed/abc123")
    );

    let anonymous = uc.execute(&Viewer::anonymous(), recipe.id).await.unwrap();
    assert!(!anonymous.is_favorite);
    assert!(anonymous.own_rating.is_none());
    assert_eq!(anonymous.rating.count, 1);
}
