use axum::extract::{Json, Path, State};
use serde_json::Value;

use super::extract::AppJson;
use crate::{
    error::AppResult,
    models::footer::FooterLink,
    models::response::Updated,
    services::footer,
    state::AppState,
};

// GET /api/footer-links (empty document when nothing saved yet)
pub async fn get_footer_links_handler(State(state): State<AppState>) -> AppResult<Json<FooterLink>> {
    Ok(Json(footer::get(&*state.repo).await?))
}

// PUT /api/footer-links/:section
pub async fn update_footer_section_handler(
    State(state): State<AppState>,
    Path(section): Path<String>,
    AppJson(payload): AppJson<Value>,
) -> AppResult<Json<Updated<FooterLink>>> {
    let data = footer::patch(&*state.repo, &section, payload).await?;
    Ok(Json(Updated {
        success: true,
        data,
    }))
}
