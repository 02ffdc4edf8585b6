use axum::extract::State;
use nutriguard_core::domain::user::{
    entities::User, ports::UserService, value_objects::UpdateProfileInput,
};

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
        user::validators::UpdateProfileValidator,
    },
};

#[utoipa::path(
    post,
    path = "/update-profile",
    tag = "user",
    summary = "Update profile",
    description = "Changes the caller's username and/or email. Values already taken by another user are rejected.",
    responses(
        (status = 200, body = User),
        (status = 400, description = "Nothing to update, or the value is taken")
    ),
    request_body = UpdateProfileValidator
)]
pub async fn update_profile(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateProfileValidator>,
) -> Result<Response<User>, ApiError> {
    let user = state
        .service
        .update_profile(
            identity,
            UpdateProfileInput {
                username: payload.username,
                email: payload.email,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(user))
}
