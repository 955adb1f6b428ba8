use axum::Json;
use serde::Serialize;

use crate::handlers::viewer::CurrentViewer;

#[derive(Serialize)]
pub struct ViewerResponse {
    pub user_id: Option<String>,
    pub is_admin: bool,
    pub display_name: Option<String>,
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(CurrentViewer(viewer): CurrentViewer) -> Json<ViewerResponse> {
    Json(ViewerResponse {
        user_id: viewer.user_id.map(|id| id.to_string()),
        is_admin: viewer.is_admin,
        display_name: viewer.display_name,
    })
}
