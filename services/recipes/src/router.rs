use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use pantry_core::error::not_found;
use pantry_core::health::healthz;
use pantry_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    comment::{add_comment, get_comments, live_comments},
    favorite::{add_favorite, get_favorite, get_favorites, remove_favorite, toggle_favorite},
    forum::{add_thread_comment, create_thread, get_categories, get_category_threads, get_thread},
    health::readyz,
    me::get_me,
    rating::{get_rating, live_rating, rate_recipe},
    recipe::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
};
use crate::state::AppState;

/// Room for the text fields and multipart framing around an image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(
        usize::try_from(state.blobs.max_size())
            .unwrap_or(usize::MAX)
            .saturating_add(FORM_OVERHEAD_BYTES),
    );
    let media = ServeDir::new(state.blobs.root());

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Viewer
        .route("/users/@me", get(get_me))
        // Recipes
        .route(
            "/recipes",
            get(list_recipes).post(create_recipe).layer(upload_limit.clone()),
        )
        .route(
            "/recipes/{id}",
            get(get_recipe)
                .put(update_recipe)
                .delete(delete_recipe)
                .layer(upload_limit),
        )
        // Ratings
        .route("/recipes/{id}/rating", get(get_rating).put(rate_recipe))
        .route("/recipes/{id}/rating/live", get(live_rating))
        // Comments
        .route("/recipes/{id}/comments", get(get_comments).post(add_comment))
        .route("/recipes/{id}/comments/live", get(live_comments))
        // Favorites
        .route("/users/@me/favorites", get(get_favorites))
        .route(
            "/users/@me/favorites/{recipe_id}",
            get(get_favorite).put(add_favorite).delete(remove_favorite),
        )
        .route("/users/@me/favorites/{recipe_id}/toggle", post(toggle_favorite))
        // Forum
        .route("/forum/categories", get(get_categories))
        .route("/forum/categories/{id}/threads", get(get_category_threads))
        .route("/forum/threads", post(create_thread))
        .route("/forum/threads/{id}", get(get_thread))
        .route("/forum/threads/{id}/comments", post(add_thread_comment))
        // Uploaded images
        .nest_service("/media", media)
        .fallback(not_found)
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
}
