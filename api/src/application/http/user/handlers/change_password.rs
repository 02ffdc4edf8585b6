use axum::extract::State;
use nutriguard_core::domain::user::{ports::UserService, value_objects::ChangePasswordInput};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
        user::validators::ChangePasswordValidator,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChangePasswordResponse {
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/change-password",
    tag = "user",
    summary = "Change password",
    responses(
        (status = 200, body = ChangePasswordResponse),
        (status = 400, description = "Mismatch, too short, or wrong old password")
    ),
    request_body = ChangePasswordValidator
)]
pub async fn change_password(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<ChangePasswordValidator>,
) -> Result<Response<ChangePasswordResponse>, ApiError> {
    state
        .service
        .change_password(
            identity,
            ChangePasswordInput {
                old_password: payload.old_password,
                new_password: payload.new_password,
                confirm_password: payload.confirm_password,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ChangePasswordResponse {
        message: "Password changed successfully".to_string(),
    }))
}
