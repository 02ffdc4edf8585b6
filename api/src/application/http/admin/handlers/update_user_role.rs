use axum::extract::State;
use nutriguard_core::domain::user::{
    entities::UserRole, ports::UserService, value_objects::UpdateUserRoleInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        admin::validators::UpdateUserRoleValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdateUserRoleResponse {
    pub message: String,
    pub user_id: Uuid,
    pub new_role: UserRole,
}

#[utoipa::path(
    post,
    path = "/update-user-role",
    tag = "admin",
    summary = "Change a user's role",
    description = "Admins cannot change their own role.",
    responses(
        (status = 200, body = UpdateUserRoleResponse),
        (status = 400, description = "Own account or unknown role"),
        (status = 404, description = "User not found")
    ),
    request_body = UpdateUserRoleValidator
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateUserRoleValidator>,
) -> Result<Response<UpdateUserRoleResponse>, ApiError> {
    let user = state
        .service
        .update_user_role(
            identity,
            UpdateUserRoleInput {
                user_id: payload.user_id,
                role: payload.new_role,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(UpdateUserRoleResponse {
        message: format!("Role of {} changed to {}", user.username, user.role),
        user_id: user.id,
        new_role: user.role,
    }))
}
