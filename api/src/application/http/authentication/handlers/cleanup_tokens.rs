use axum::extract::State;
use nutriguard_core::domain::authentication::ports::AuthService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CleanupTokensResponse {
    pub message: String,
    pub removed: u64,
}

#[utoipa::path(
    post,
    path = "/cleanup-tokens",
    tag = "auth",
    summary = "Purge expired tokens",
    responses(
        (status = 200, body = CleanupTokensResponse)
    ),
)]
pub async fn cleanup_tokens(
    State(state): State<AppState>,
) -> Result<Response<CleanupTokensResponse>, ApiError> {
    let removed = state
        .service
        .cleanup_expired_tokens()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(CleanupTokensResponse {
        message: format!("Removed {removed} expired tokens"),
        removed,
    }))
}
