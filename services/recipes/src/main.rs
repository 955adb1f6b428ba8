use sea_orm::Database;
use tracing::info;
use url::Url;

use pantry_core::config::Config;
use pantry_core::tracing::init_tracing;

use pantry_recipes::config::RecipesConfig;
use pantry_recipes::infra::blob::FilesystemBlobStore;
use pantry_recipes::infra::feed::ChangeFeed;
use pantry_recipes::infra::forum::HttpForumGateway;
use pantry_recipes::router::build_router;
use pantry_recipes::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = RecipesConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let blobs = FilesystemBlobStore::new(
        config.blob_root.clone(),
        &config.blob_public_url,
        config.upload_max_bytes,
    )
    .await
    .expect("failed to prepare blob directory");

    let forum_url = Url::parse(&config.forum_base_url).expect("invalid FORUM_BASE_URL");
    let forum = HttpForumGateway::new(reqwest::Client::new(), forum_url);

    let state = AppState {
        db,
        blobs,
        forum,
        feed: ChangeFeed::new(),
        session_secret: config.session_secret,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.recipes_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("recipes service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
