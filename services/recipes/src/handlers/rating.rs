use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use pantry_domain::rating::RatingValue;

use crate::domain::types::RatingSummary;
use crate::domain::repository::RecipeRepository;
use crate::error::RecipesServiceError;
use crate::handlers::live::snapshot_event;
use crate::handlers::parse_recipe_id;
use crate::handlers::viewer::CurrentViewer;
use crate::infra::feed::FeedTopic;
use crate::state::AppState;
use crate::usecase::rating::{GetRatingSummaryUseCase, RateRecipeUseCase};

#[derive(Serialize)]
pub struct RatingResponse {
    pub average: f64,
    pub count: u64,
    pub own_rating: Option<RatingValue>,
}

impl From<RatingSummary> for RatingResponse {
    fn from(summary: RatingSummary) -> Self {
        Self {
            average: summary.aggregate.average,
            count: summary.aggregate.count,
            own_rating: summary.own_rating,
        }
    }
}

// ── GET /recipes/{id}/rating ─────────────────────────────────────────────────

pub async fn get_rating(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RatingResponse>, RecipesServiceError> {
    let recipe_id = parse_recipe_id(&id)?;
    let usecase = GetRatingSummaryUseCase {
        repo: state.rating_repo(),
    };
    let summary = usecase.execute(&viewer, recipe_id).await?;
    Ok(Json(summary.into()))
}

// ── PUT /recipes/{id}/rating ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RateRequest {
    pub value: f64,
}

pub async fn rate_recipe(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RateRequest>,
) -> Result<Json<RatingResponse>, RecipesServiceError> {
    let recipe_id = parse_recipe_id(&id)?;
    let usecase = RateRecipeUseCase {
        recipes: state.recipe_repo(),
        repo: state.rating_repo(),
        notifier: state.notifier(),
    };
    let aggregate = usecase.execute(&viewer, recipe_id, body.value).await?;
    Ok(Json(RatingResponse {
        average: aggregate.average,
        count: aggregate.count,
        own_rating: RatingValue::try_from_f64(body.value).ok(),
    }))
}

// ── GET /recipes/{id}/rating/live ────────────────────────────────────────────

pub async fn live_rating(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, RecipesServiceError> {
    let recipe_id = parse_recipe_id(&id)?;
    state
        .recipe_repo()
        .find_by_id(recipe_id)
        .await?
        .ok_or(RecipesServiceError::RecipeNotFound)?;

    let repo = state.rating_repo();
    let subscription = state.feed.subscribe(recipe_id, FeedTopic::Rating, move || {
        let usecase = GetRatingSummaryUseCase { repo: repo.clone() };
        let viewer = viewer.clone();
        async move {
            usecase
                .execute(&viewer, recipe_id)
                .await
                .map(RatingResponse::from)
        }
    });
    Ok(Sse::new(subscription.map(snapshot_event)).keep_alive(KeepAlive::default()))
}
