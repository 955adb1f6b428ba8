use pantry_recipes::domain::repository::ForumGateway;
use pantry_recipes::domain::types::{ForumId, Viewer};
use pantry_recipes::error::RecipesServiceError;
use pantry_recipes::usecase::forum::{
    AddThreadCommentUseCase, CreateThreadInput, CreateThreadUseCase,
};

use crate::helpers::{BROKEN_THREAD, KNOWN_THREAD, forum_gateway, member, spawn_forum_stub};

#[tokio::test]
async fn should_decode_categories_with_mixed_ids() {
    let (url, _stub) = spawn_forum_stub().await;
    let categories = forum_gateway(url).categories().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id, ForumId::Number(1));
    assert_eq!(categories[0].thread_count, Some(2));
    assert_eq!(categories[1].id, ForumId::Text("grill".to_owned()));
    assert!(categories[1].description.is_none());
}

#[tokio::test]
async fn should_pass_category_id_through_to_forum() {
    let (url, _stub) = spawn_forum_stub().await;
    let threads = forum_gateway(url).threads_in_category("baking").await.unwrap();

    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].thread_id, ForumId::Number(7));
    assert_eq!(threads[0].title, "Sourdough in baking");
    assert_eq!(threads[0].view_count, 12);
    assert_eq!(threads[0].comments_count, 0);
}

#[tokio::test]
async fn should_map_forum_404_to_thread_not_found() {
    let (url, _stub) = spawn_forum_stub().await;
    let result = forum_gateway(url).thread("404").await;
    assert!(matches!(result, Err(RecipesServiceError::ThreadNotFound)));
}

#[tokio::test]
async fn should_treat_missing_listing_endpoints_as_unavailable() {
    let (url, _stub) = spawn_forum_stub().await;
    let misrouted = forum_gateway(url.join("/not-the-forum/").unwrap());

    let categories = misrouted.categories().await;
    assert!(matches!(categories, Err(RecipesServiceError::ForumUnavailable(_))));
    let threads = misrouted.threads_in_category("baking").await;
    assert!(matches!(threads, Err(RecipesServiceError::ForumUnavailable(_))));
    let thread = misrouted.thread(KNOWN_THREAD).await;
    assert!(matches!(thread, Err(RecipesServiceError::ThreadNotFound)));
}

#[tokio::test]
async fn should_map_forum_failure_to_unavailable() {
    let (url, _stub) = spawn_forum_stub().await;
    let result = forum_gateway(url).thread(BROKEN_THREAD).await;
    assert!(matches!(result, Err(RecipesServiceError::ForumUnavailable(_))));
}

#[tokio::test]
async fn should_post_comment_and_return_refreshed_thread() {
    let (url, stub) = spawn_forum_stub().await;
    let uc = AddThreadCommentUseCase {
        gateway: forum_gateway(url),
    };

    let thread = uc.execute(KNOWN_THREAD, "Feed it twice a day").await.unwrap();

    assert_eq!(thread.comments.len(), 1);
    assert_eq!(thread.comments[0].content, "Feed it twice a day");
    assert_eq!(*stub.comments.lock().unwrap(), vec!["Feed it twice a day"]);
}

#[tokio::test]
async fn should_not_reach_forum_with_blank_comment() {
    let (url, stub) = spawn_forum_stub().await;
    let uc = AddThreadCommentUseCase {
        gateway: forum_gateway(url),
    };

    let result = uc.execute(KNOWN_THREAD, " \n ").await;
    assert!(matches!(
        result,
        Err(RecipesServiceError::EmptyField("content"))
    ));
    assert!(stub.comments.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_create_thread_with_split_tags_and_author() {
    let (url, stub) = spawn_forum_stub().await;
    let uc = CreateThreadUseCase {
        gateway: forum_gateway(url),
    };
    let viewer = member("ada");

    uc.execute(
        &viewer,
        CreateThreadInput {
            title: "Best flour?".to_owned(),
            content: "Bread flour or all-purpose".to_owned(),
            tags: "bread, flour,, ".to_owned(),
            category: "1".to_owned(),
        },
    )
    .await
    .unwrap();

    let created = stub.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["title"], "Best flour?");
    assert_eq!(created[0]["tags"], serde_json::json!(["bread", "flour"]));
    assert_eq!(
        created[0]["userId"],
        viewer.user_id.unwrap().to_string().as_str()
    );
}

#[tokio::test]
async fn should_require_login_to_create_thread() {
    let (url, stub) = spawn_forum_stub().await;
    let uc = CreateThreadUseCase {
        gateway: forum_gateway(url),
    };

    let result = uc
        .execute(
            &Viewer::anonymous(),
            CreateThreadInput {
                title: "Hi".to_owned(),
                content: "Hello".to_owned(),
                tags: String::new(),
                category: "1".to_owned(),
            },
        )
        .await;
    assert!(matches!(result, Err(RecipesServiceError::LoginRequired)));
    assert!(stub.created.lock().unwrap().is_empty());
}
