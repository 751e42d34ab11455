use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;

use super::upload::ImageForm;
use crate::error::AppResult;
use crate::models::response::{Created, SuccessResponse};
use crate::models::slider::Slider;
use crate::services::image_resource;
use crate::state::AppState;

// GET /api/sliders
pub async fn list_sliders_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Slider>>> {
    let sliders = image_resource::list::<Slider, _>(&*state.repo).await?;
    Ok(Json(sliders))
}

// POST /api/sliders (multipart, file field "image")
pub async fn create_slider_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Created<Slider>>> {
    let form = ImageForm::read(multipart?).await?;
    let slider =
        image_resource::create::<Slider, _>(&*state.repo, &*state.images, form.image, ()).await?;
    Ok(Json(Created::new(slider)))
}

// DELETE /api/sliders/:id
pub async fn delete_slider_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    image_resource::delete::<Slider, _>(&*state.repo, &*state.images, &id).await?;
    Ok(Json(SuccessResponse::ok()))
}
