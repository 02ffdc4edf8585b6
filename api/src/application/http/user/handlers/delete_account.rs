use axum::extract::State;
use nutriguard_core::domain::user::ports::UserService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteAccountResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/delete-account",
    tag = "user",
    summary = "Delete account",
    description = "Deletes the caller along with their stored images, saved analyses, medical profile and tokens.",
    responses(
        (status = 200, body = DeleteAccountResponse)
    ),
)]
pub async fn delete_account(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<DeleteAccountResponse>, ApiError> {
    state
        .service
        .delete_account(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteAccountResponse {
        message: "Account deleted successfully".to_string(),
    }))
}
