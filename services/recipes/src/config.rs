use std::path::PathBuf;

use serde::Deserialize;

use pantry_core::config::Config;

/// Recipes service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct RecipesConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret shared with the identity provider for session tokens.
    pub session_secret: String,
    /// TCP port for the HTTP server (default 3114). Env var: `RECIPES_PORT`.
    #[serde(default = "default_port")]
    pub recipes_port: u16,
    /// Directory holding uploaded images (default `./data/blobs`).
    #[serde(default = "default_blob_root")]
    pub blob_root: PathBuf,
    /// Public URL prefix under which `blob_root` is served.
    #[serde(default = "default_blob_public_url")]
    pub blob_public_url: String,
    /// Largest accepted image, in bytes (default 10 MiB).
    #[serde(default = "default_upload_max_bytes")]
    pub upload_max_bytes: u64,
    /// Base URL of the forum REST service.
    #[serde(default = "default_forum_base_url")]
    pub forum_base_url: String,
}

impl Config for RecipesConfig {}

fn default_port() -> u16 {
    3114
}

fn default_blob_root() -> PathBuf {
    PathBuf::from("./data/blobs")
}

fn default_blob_public_url() -> String {
    "http://localhost:3114/media".to_owned()
}

fn default_upload_max_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_forum_base_url() -> String {
    "http://localhost:8080".to_owned()
}
