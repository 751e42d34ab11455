use axum::extract::{Json, Path, State};

use super::extract::AppJson;
use crate::{
    error::AppResult,
    models::category::{Category, CreateCategorySchema},
    models::response::SuccessResponse,
    services::category,
    state::AppState,
};

// GET /api/categories (sorted by name)
pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(category::list(&*state.repo).await?))
}

// POST /api/categories
pub async fn create_category_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateCategorySchema>,
) -> AppResult<Json<Category>> {
    let created = category::create(&*state.repo, body.name.as_deref()).await?;
    Ok(Json(created))
}

// DELETE /api/categories/:id
pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    category::delete(&*state.repo, &id).await?;
    Ok(Json(SuccessResponse::ok()))
}
