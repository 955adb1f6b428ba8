use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::RecipesServiceError;
use crate::handlers::parse_recipe_id;
use crate::handlers::recipe::RecipeResponse;
use crate::handlers::viewer::CurrentViewer;
use crate::state::AppState;
use crate::usecase::favorite::{
    AddFavoriteUseCase, IsFavoriteUseCase, ListFavoriteRecipesUseCase, RemoveFavoriteUseCase,
    ToggleFavoriteUseCase,
};

// ── GET /users/@me/favorites ─────────────────────────────────────────────────

pub async fn get_favorites(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeResponse>>, RecipesServiceError> {
    let usecase = ListFavoriteRecipesUseCase {
        recipes: state.recipe_repo(),
        repo: state.favorite_repo(),
    };
    let recipes = usecase.execute(&viewer).await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

#[derive(Serialize)]
pub struct FavoriteStateResponse {
    pub recipe_id: String,
    pub is_favorite: bool,
}

// ── GET /users/@me/favorites/{recipe_id} ─────────────────────────────────────

pub async fn get_favorite(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<Json<FavoriteStateResponse>, RecipesServiceError> {
    let recipe_id = parse_recipe_id(&recipe_id)?;
    let usecase = IsFavoriteUseCase {
        repo: state.favorite_repo(),
    };
    let is_favorite = usecase.execute(&viewer, recipe_id).await?;
    Ok(Json(FavoriteStateResponse {
        recipe_id: recipe_id.to_string(),
        is_favorite,
    }))
}

// ── PUT /users/@me/favorites/{recipe_id} ─────────────────────────────────────

pub async fn add_favorite(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<StatusCode, RecipesServiceError> {
    viewer.require_user()?;
    let recipe_id = parse_recipe_id(&recipe_id)?;
    let usecase = AddFavoriteUseCase {
        recipes: state.recipe_repo(),
        repo: state.favorite_repo(),
    };
    usecase.execute(&viewer, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /users/@me/favorites/{recipe_id} ──────────────────────────────────

pub async fn remove_favorite(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<StatusCode, RecipesServiceError> {
    viewer.require_user()?;
    let recipe_id = parse_recipe_id(&recipe_id)?;
    let usecase = RemoveFavoriteUseCase {
        repo: state.favorite_repo(),
    };
    usecase.execute(&viewer, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /users/@me/favorites/{recipe_id}/toggle ─────────────────────────────

pub async fn toggle_favorite(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<Json<FavoriteStateResponse>, RecipesServiceError> {
    viewer.require_user()?;
    let recipe_id = parse_recipe_id(&recipe_id)?;
    let usecase = ToggleFavoriteUseCase {
        recipes: state.recipe_repo(),
        repo: state.favorite_repo(),
    };
    let is_favorite = usecase.execute(&viewer, recipe_id).await?;
    Ok(Json(FavoriteStateResponse {
        recipe_id: recipe_id.to_string(),
        is_favorite,
    }))
}
