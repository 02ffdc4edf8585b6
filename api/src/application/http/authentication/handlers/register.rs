use axum::extract::State;
use nutriguard_core::domain::{
    authentication::{ports::AuthService, value_objects::RegisterInput},
    user::entities::User,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    authentication::validators::RegisterValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    summary = "Register",
    description = "Creates a user account with the `user` role.",
    responses(
        (status = 200, body = RegisterResponse),
        (status = 400, description = "Username or email already exists")
    ),
    request_body = RegisterValidator
)]
pub async fn register(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<RegisterValidator>,
) -> Result<Response<RegisterResponse>, ApiError> {
    let user = state
        .service
        .register(RegisterInput {
            username: payload.username,
            email: payload.email,
            password: payload.password,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RegisterResponse {
        message: "User registered successfully".to_string(),
        user,
    }))
}
