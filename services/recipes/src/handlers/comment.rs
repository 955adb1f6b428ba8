use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::domain::types::Comment;
use crate::domain::repository::RecipeRepository;
use crate::error::RecipesServiceError;
use crate::handlers::live::snapshot_event;
use crate::handlers::parse_recipe_id;
use crate::handlers::viewer::CurrentViewer;
use crate::infra::feed::FeedTopic;
use crate::state::AppState;
use crate::usecase::comment::{AddCommentUseCase, ListCommentsUseCase};

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub user_id: String,
    pub display_name: String,
    pub content: String,
    #[serde(serialize_with = "pantry_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            user_id: comment.user_id.to_string(),
            display_name: comment.display_name,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

fn comment_responses(comments: Vec<Comment>) -> Vec<CommentResponse> {
    comments.into_iter().map(CommentResponse::from).collect()
}

// ── GET /recipes/{id}/comments ───────────────────────────────────────────────

pub async fn get_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CommentResponse>>, RecipesServiceError> {
    let recipe_id = parse_recipe_id(&id)?;
    let usecase = ListCommentsUseCase {
        repo: state.comment_repo(),
    };
    let comments = usecase.execute(recipe_id).await?;
    Ok(Json(comment_responses(comments)))
}

// ── POST /recipes/{id}/comments ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

pub async fn add_comment(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), RecipesServiceError> {
    let recipe_id = parse_recipe_id(&id)?;
    let usecase = AddCommentUseCase {
        recipes: state.recipe_repo(),
        repo: state.comment_repo(),
        notifier: state.notifier(),
    };
    let comment = usecase.execute(&viewer, recipe_id, &body.content).await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

// ── GET /recipes/{id}/comments/live ──────────────────────────────────────────

pub async fn live_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, RecipesServiceError> {
    let recipe_id = parse_recipe_id(&id)?;
    state
        .recipe_repo()
        .find_by_id(recipe_id)
        .await?
        .ok_or(RecipesServiceError::RecipeNotFound)?;

    let repo = state.comment_repo();
    let subscription = state.feed.subscribe(recipe_id, FeedTopic::Comments, move || {
        let usecase = ListCommentsUseCase { repo: repo.clone() };
        async move { usecase.execute(recipe_id).await.map(comment_responses) }
    });
    Ok(Sse::new(subscription.map(snapshot_event)).keep_alive(KeepAlive::default()))
}
