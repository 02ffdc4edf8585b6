use axum::extract::{Path, State};
use nutriguard_core::domain::user::ports::UserService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteUserResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "admin",
    summary = "Delete a user",
    description = "Removes the user and everything they own. Admins cannot delete themselves.",
    responses(
        (status = 200, body = DeleteUserResponse),
        (status = 400, description = "Own account"),
        (status = 404, description = "User not found")
    ),
    params(
        ("user_id" = Uuid, Path, description = "User ID"),
    ),
)]
pub async fn delete_user(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<DeleteUserResponse>, ApiError> {
    state
        .service
        .delete_user(identity, user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteUserResponse {
        message: format!("User {user_id} deleted"),
    }))
}
