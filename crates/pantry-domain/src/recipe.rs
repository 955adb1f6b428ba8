//! Recipe field helpers.

use url::Url;

use crate::id::RecipeId;

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Derive an embeddable player URL from a YouTube watch URL.
///
/// Uses the `v` query parameter. Returns `None` when the URL does not parse
/// or carries no video id.
pub fn video_embed_url(video_url: &str) -> Option<String> {
    let url = Url::parse(video_url.trim()).ok()?;
    let (_, video_id) = url.query_pairs().find(|(key, _)| key == "v")?;
    if video_id.is_empty() {
        return None;
    }
    Some(format!("{YOUTUBE_EMBED_BASE}{video_id}"))
}

/// Split newline-delimited form text into ordered entries.
///
/// Each line is trimmed; blank lines are dropped.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Reduce an uploaded file name to a safe single path segment.
///
/// Directory components are discarded and anything outside
/// `[A-Za-z0-9._-]` becomes `_`. An empty result becomes `"image"`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_owned()
    } else {
        cleaned.to_owned()
    }
}

/// Blob path for a recipe image: `recipes/{recipe_id}/{file_name}`.
pub fn image_blob_path(recipe_id: RecipeId, file_name: &str) -> String {
    format!("recipes/{recipe_id}/{}", sanitize_file_name(file_name))
}
