use chrono::Utc;

use pantry_domain::feed::LiveView;
use pantry_recipes::error::RecipesServiceError;
use pantry_recipes::infra::feed::{ChangeFeed, FeedTopic};
use pantry_recipes::usecase::comment::{AddCommentUseCase, ListCommentsUseCase};

use crate::helpers::{MemCommentRepo, MemRecipeRepo, member, next_snapshot, test_recipe};

fn add_usecase(
    recipes: &MemRecipeRepo,
    comments: &MemCommentRepo,
    feed: &ChangeFeed,
) -> AddCommentUseCase<MemRecipeRepo, MemCommentRepo, ChangeFeed> {
    AddCommentUseCase {
        recipes: recipes.clone(),
        repo: comments.clone(),
        notifier: feed.clone(),
    }
}

#[tokio::test]
async fn should_list_comments_newest_first() {
    let recipe = test_recipe("Ramen", Utc::now());
    let recipes = MemRecipeRepo::with(vec![recipe.clone()]);
    let comments = MemCommentRepo::default();
    let uc = add_usecase(&recipes, &comments, &ChangeFeed::new());
    for text in ["first", "second", "third"] {
        uc.execute(&member("ada"), recipe.id, text).await.unwrap();
    }

    let listed: Vec<String> = ListCommentsUseCase {
        repo: comments.clone(),
    }
    .execute(recipe.id)
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.content)
    .collect();
    assert_eq!(listed, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn should_reject_blank_comment_without_writing() {
    let recipe = test_recipe("Ramen", Utc::now());
    let recipes = MemRecipeRepo::with(vec![recipe.clone()]);
    let comments = MemCommentRepo::default();
    let uc = add_usecase(&recipes, &comments, &ChangeFeed::new());

    let result = uc.execute(&member("ada"), recipe.id, "   ").await;
    assert!(matches!(
        result,
        Err(RecipesServiceError::EmptyField("content"))
    ));
    assert!(comments.comments.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_push_full_comment_list_to_live_subscribers() {
    let recipe = test_recipe("Ramen", Utc::now());
    let recipe_id = recipe.id;
    let recipes = MemRecipeRepo::with(vec![recipe]);
    let comments = MemCommentRepo::default();
    let feed = ChangeFeed::new();

    let loader_repo = comments.clone();
    let mut live = feed.subscribe(recipe_id, FeedTopic::Comments, move || {
        let usecase = ListCommentsUseCase {
            repo: loader_repo.clone(),
        };
        async move { usecase.execute(recipe_id).await }
    });
    let mut view = LiveView::new();
    assert!(!view.apply(next_snapshot(&mut live).await));

    let uc = add_usecase(&recipes, &comments, &feed);
    uc.execute(&member("ada"), recipe_id, "Rich broth")
        .await
        .unwrap();
    assert!(view.apply(next_snapshot(&mut live).await));
    assert_eq!(view.items().len(), 1);

    uc.execute(&member("bo"), recipe_id, "Needs more chili")
        .await
        .unwrap();
    assert!(view.apply(next_snapshot(&mut live).await));
    let contents: Vec<&str> = view.items().iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["Needs more chili", "Rich broth"]);
    assert_eq!(view.deliveries(), 3);
}

#[tokio::test]
async fn should_release_feed_channel_when_subscriber_leaves() {
    let recipe = test_recipe("Ramen", Utc::now());
    let recipe_id = recipe.id;
    let recipes = MemRecipeRepo::with(vec![recipe]);
    let comments = MemCommentRepo::default();
    let feed = ChangeFeed::new();

    let loader_repo = comments.clone();
    let live = feed.subscribe(recipe_id, FeedTopic::Comments, move || {
        let usecase = ListCommentsUseCase {
            repo: loader_repo.clone(),
        };
        async move { usecase.execute(recipe_id).await }
    });
    assert_eq!(feed.channel_count(), 1);
    drop(live);
    assert_eq!(feed.channel_count(), 0);

    add_usecase(&recipes, &comments, &feed)
        .execute(&member("ada"), recipe_id, "Still saved")
        .await
        .unwrap();
    assert_eq!(comments.comments.lock().unwrap().len(), 1);
}
