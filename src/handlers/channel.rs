use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;

use super::upload::ImageForm;
use crate::error::AppResult;
use crate::models::channel::{Channel, ChannelFields};
use crate::models::response::{Created, SuccessResponse};
use crate::services::image_resource;
use crate::state::AppState;

// GET /api/channels
pub async fn list_channels_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Channel>>> {
    let channels = image_resource::list::<Channel, _>(&*state.repo).await?;
    Ok(Json(channels))
}

// POST /api/channels (multipart: "image" file + "category" text)
pub async fn create_channel_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Created<Channel>>> {
    let form = ImageForm::read(multipart?).await?;
    let fields = ChannelFields::new(form.text("category"));
    let channel =
        image_resource::create::<Channel, _>(&*state.repo, &*state.images, form.image, fields)
            .await?;
    Ok(Json(Created::new(channel)))
}

// DELETE /api/channels/:id
pub async fn delete_channel_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    image_resource::delete::<Channel, _>(&*state.repo, &*state.images, &id).await?;
    Ok(Json(SuccessResponse::ok()))
}
