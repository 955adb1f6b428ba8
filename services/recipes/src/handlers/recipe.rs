use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{Multipart, Path, RawQuery, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use pantry_domain::pagination::PageRequest;
use pantry_domain::rating::{AggregateRating, RatingValue};
use pantry_domain::recipe::split_lines;

use crate::domain::types::{ImageUpload, Recipe, RecipeDetail, RecipeDraft};
use crate::error::RecipesServiceError;
use crate::handlers::parse_recipe_id;
use crate::handlers::viewer::CurrentViewer;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase,
    UpdateRecipeUseCase,
};

#[derive(Serialize)]
pub struct RecipeResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(serialize_with = "pantry_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "pantry_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.to_string(),
            title: recipe.title,
            description: recipe.description,
            image_url: recipe.image_url,
            video_url: recipe.video_url,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    pub rating: AggregateRating,
    pub is_favorite: bool,
    pub own_rating: Option<RatingValue>,
    pub video_embed_url: Option<String>,
}

impl From<RecipeDetail> for RecipeDetailResponse {
    fn from(detail: RecipeDetail) -> Self {
        Self {
            recipe: detail.recipe.into(),
            rating: detail.rating,
            is_favorite: detail.is_favorite,
            own_rating: detail.own_rating,
            video_embed_url: detail.video_embed_url,
        }
    }
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

pub async fn list_recipes(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<RecipeResponse>>, RecipesServiceError> {
    let page: PageRequest = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| RecipesServiceError::MissingData)?
        .unwrap_or_default();
    let usecase = ListRecipesUseCase {
        repo: state.recipe_repo(),
    };
    let recipes = usecase.execute(page).await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeDetailResponse>, RecipesServiceError> {
    let id = parse_recipe_id(&id)?;
    let usecase = GetRecipeUseCase {
        repo: state.recipe_repo(),
        ratings: state.rating_repo(),
        favorites: state.favorite_repo(),
    };
    let detail = usecase.execute(&viewer, id).await?;
    Ok(Json(detail.into()))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

pub async fn create_recipe(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<RecipeResponse>), RecipesServiceError> {
    viewer.require_admin()?;
    let (draft, image) = read_recipe_form(multipart).await?;
    let usecase = CreateRecipeUseCase {
        repo: state.recipe_repo(),
        blobs: state.blob_store(),
    };
    let recipe = usecase.execute(&viewer, draft, image).await?;
    Ok((StatusCode::CREATED, Json(recipe.into())))
}

// ── PUT /recipes/{id} ────────────────────────────────────────────────────────

pub async fn update_recipe(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    viewer.require_admin()?;
    let id = parse_recipe_id(&id)?;
    let (draft, image) = read_recipe_form(multipart).await?;
    let usecase = UpdateRecipeUseCase {
        repo: state.recipe_repo(),
        blobs: state.blob_store(),
    };
    let recipe = usecase.execute(&viewer, id, draft, image).await?;
    Ok(Json(recipe.into()))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, RecipesServiceError> {
    viewer.require_admin()?;
    let id = parse_recipe_id(&id)?;
    let usecase = DeleteRecipeUseCase {
        repo: state.recipe_repo(),
        notifier: state.notifier(),
    };
    usecase.execute(&viewer, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Multipart form ───────────────────────────────────────────────────────────

/// Read the recipe edit form.
///
/// Text fields: `title`, `description`, `video_url`, `image_url`, and
/// newline-separated `ingredients` and `steps`. An optional file field
/// `image` carries the picture; an empty file counts as no image.
async fn read_recipe_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(RecipeDraft, Option<ImageUpload>), RecipesServiceError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "recipe form is not multipart");
        RecipesServiceError::MissingData
    })?;
    let mut draft = RecipeDraft::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "title" => draft.title = field_text(field).await?,
            "description" => draft.description = field_text(field).await?,
            "video_url" => draft.video_url = Some(field_text(field).await?),
            "image_url" => draft.image_url = Some(field_text(field).await?),
            "ingredients" => draft.ingredients = split_lines(&field_text(field).await?),
            "steps" => draft.steps = split_lines(&field_text(field).await?),
            "image" => {
                let file_name = field.file_name().unwrap_or("image").to_owned();
                let data = field.bytes().await.map_err(malformed)?;
                if !data.is_empty() {
                    image = Some(ImageUpload { file_name, data });
                }
            }
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }
    Ok((draft, image))
}

async fn field_text(field: Field<'_>) -> Result<String, RecipesServiceError> {
    field.text().await.map_err(malformed)
}

fn malformed(error: axum::extract::multipart::MultipartError) -> RecipesServiceError {
    tracing::debug!(error = %error, "malformed recipe form");
    RecipesServiceError::MissingData
}
