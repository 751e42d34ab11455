use axum::{
    extract::{Json, State},
    http::StatusCode,
};

use super::extract::AppJson;
use crate::{
    error::AppResult,
    models::response::MessageResponse,
    models::user::{AuthResponse, CredentialsPayload},
    services::credentials,
    state::AppState,
};

// POST /api/register
pub async fn register_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CredentialsPayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    credentials::register(&*state.repo, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

// POST /api/login
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CredentialsPayload>,
) -> AppResult<Json<AuthResponse>> {
    let token = credentials::login(&*state.repo, &state.jwt, payload).await?;

    Ok(Json(AuthResponse {
        token,
        token_type: "Bearer".to_string(),
    }))
}
