use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::types::{ForumCategory, NewThread, Thread, ThreadSummary};
use crate::error::RecipesServiceError;
use crate::handlers::viewer::CurrentViewer;
use crate::state::AppState;
use crate::usecase::forum::{
    AddThreadCommentUseCase, CreateThreadInput, CreateThreadUseCase, GetCategoryThreadsUseCase,
    GetForumCategoriesUseCase, GetThreadUseCase,
};

// ── GET /forum/categories ────────────────────────────────────────────────────

pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<ForumCategory>>, RecipesServiceError> {
    let usecase = GetForumCategoriesUseCase {
        gateway: state.forum_gateway(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /forum/categories/{id}/threads ───────────────────────────────────────

pub async fn get_category_threads(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<ThreadSummary>>, RecipesServiceError> {
    let usecase = GetCategoryThreadsUseCase {
        gateway: state.forum_gateway(),
    };
    Ok(Json(usecase.execute(&category_id).await?))
}

// ── GET /forum/threads/{id} ──────────────────────────────────────────────────

pub async fn get_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> Result<Json<Thread>, RecipesServiceError> {
    let usecase = GetThreadUseCase {
        gateway: state.forum_gateway(),
    };
    Ok(Json(usecase.execute(&thread_id).await?))
}

// ── POST /forum/threads ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateThreadRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: String,
    pub category: String,
}

pub async fn create_thread(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Json(body): Json<CreateThreadRequest>,
) -> Result<(StatusCode, Json<NewThread>), RecipesServiceError> {
    let usecase = CreateThreadUseCase {
        gateway: state.forum_gateway(),
    };
    let thread = usecase
        .execute(
            &viewer,
            CreateThreadInput {
                title: body.title,
                content: body.content,
                tags: body.tags,
                category: body.category,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(thread)))
}

// ── POST /forum/threads/{id}/comments ────────────────────────────────────────

#[derive(Deserialize)]
pub struct ThreadCommentRequest {
    pub content: String,
}

pub async fn add_thread_comment(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
    Json(body): Json<ThreadCommentRequest>,
) -> Result<Json<Thread>, RecipesServiceError> {
    let usecase = AddThreadCommentUseCase {
        gateway: state.forum_gateway(),
    };
    Ok(Json(usecase.execute(&thread_id, &body.content).await?))
}
