use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_test::TestServer;
use serde_json::{Value, json};

use pantry_domain::id::RecipeId;
use pantry_recipes::domain::repository::BlobStore;
use pantry_recipes::router::build_router;
use pantry_testing::auth::MockSession;

use crate::helpers::{KNOWN_THREAD, spawn_forum_stub, test_state};

async fn server() -> (TestServer, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let (forum_url, _stub) = spawn_forum_stub().await;
    let state = test_state(forum_url, dir.path()).await;
    (TestServer::new(build_router(state)).unwrap(), dir)
}

fn cookie(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap()
}

fn recipe_path(suffix: &str) -> String {
    format!("/recipes/{}{suffix}", RecipeId::generate())
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_liveness_probe() {
    let (server, _dir) = server().await;
    server.get("/healthz").await.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let (server, _dir) = server().await;
    let response = server.get("/readyz").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["kind"], "UNAVAILABLE");
}

#[tokio::test]
async fn should_answer_unknown_route_with_json_404_and_request_id() {
    let (server, _dir) = server().await;
    let response = server.get("/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "NOT_FOUND");
    assert!(
        response
            .headers()
            .contains_key(HeaderName::from_static("x-request-id"))
    );
}

// ── Identity ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_describe_anonymous_viewer() {
    let (server, _dir) = server().await;
    let response = server.get("/users/@me").await;
    response.assert_status(StatusCode::OK);
    response.assert_json(&json!({
        "user_id": null,
        "is_admin": false,
        "display_name": null,
    }));
}

#[tokio::test]
async fn should_reject_invalid_session_token() {
    let (server, _dir) = server().await;
    let response = server
        .get(&recipe_path(""))
        .add_header(header::COOKIE, cookie("pantry_session=not-a-token"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_SESSION");
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let (server, _dir) = server().await;
    let mut session = MockSession::random();
    session.secret = "some-other-secret".to_owned();
    let response = server
        .get("/users/@me")
        .add_header(header::COOKIE, cookie(&session.cookie()))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_SESSION");
}

// ── Anonymous writes ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_login_for_writes() {
    let (server, _dir) = server().await;

    let create = server.post("/recipes").await;
    create.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(create.json::<Value>()["kind"], "LOGIN_REQUIRED");

    server
        .delete(&recipe_path(""))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .put(&recipe_path("/rating"))
        .json(&json!({ "value": 4.5 }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post(&recipe_path("/comments"))
        .json(&json!({ "content": "Yum" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post(&format!("/users/@me/favorites/{}/toggle", RecipeId::generate()))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/users/@me/favorites")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_report_no_favorite_for_anonymous_viewer() {
    let (server, _dir) = server().await;
    let recipe_id = RecipeId::generate();
    let response = server
        .get(&format!("/users/@me/favorites/{recipe_id}"))
        .await;
    response.assert_status(StatusCode::OK);
    response.assert_json(&json!({
        "recipe_id": recipe_id.to_string(),
        "is_favorite": false,
    }));
}

#[tokio::test]
async fn should_treat_malformed_recipe_id_as_not_found() {
    let (server, _dir) = server().await;
    let response = server.get("/recipes/not-a-uuid/comments").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "RECIPE_NOT_FOUND");
}

// ── Media ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_serve_uploaded_images() {
    let dir = tempfile::tempdir().unwrap();
    let (forum_url, _stub) = spawn_forum_stub().await;
    let state = test_state(forum_url, dir.path()).await;
    let url = state
        .blobs
        .put("recipes/abc/cake.jpg", b"jpeg bytes")
        .await
        .unwrap();
    assert!(url.ends_with("/media/recipes/abc/cake.jpg"));

    let server = TestServer::new(build_router(state)).unwrap();
    let response = server.get("/media/recipes/abc/cake.jpg").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "jpeg bytes");
}

// ── Forum proxy ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_proxy_forum_categories() {
    let (server, _dir) = server().await;
    let response = server.get("/forum/categories").await;
    response.assert_status(StatusCode::OK);
    response.assert_json(&json!([
        { "id": 1, "name": "Baking", "threadCount": 2 },
        { "id": "grill", "name": "Grilling" }
    ]));
}

#[tokio::test]
async fn should_proxy_thread_comment_and_return_thread() {
    let (server, _dir) = server().await;
    let response = server
        .post(&format!("/forum/threads/{KNOWN_THREAD}/comments"))
        .json(&json!({ "content": "Great tip" }))
        .await;
    response.assert_status(StatusCode::OK);
    let thread = response.json::<Value>();
    assert_eq!(thread["id"], 7);
    assert_eq!(thread["comments"][0]["content"], "Great tip");
}

#[tokio::test]
async fn should_surface_missing_forum_thread_as_404() {
    let (server, _dir) = server().await;
    let response = server.get("/forum/threads/12345").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "THREAD_NOT_FOUND");
}

#[tokio::test]
async fn should_require_login_to_open_forum_thread() {
    let (server, _dir) = server().await;
    let response = server
        .post("/forum/threads")
        .json(&json!({ "title": "Hi", "content": "Hello", "category": "1" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
