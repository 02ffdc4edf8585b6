use axum::extract::State;
use nutriguard_core::domain::{
    authentication::{entities::AuthSession, ports::AuthService, value_objects::LoginInput},
    user::entities::User,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    authentication::validators::LoginValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

/// Token pair together with the user it was issued to.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: User,
}

impl From<AuthSession> for TokenResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
            token_type: session.tokens.token_type,
            user: session.user,
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    summary = "Login",
    description = "Exchanges credentials for a fresh token pair. Every token issued earlier to the same user is revoked.",
    responses(
        (status = 200, body = TokenResponse),
        (status = 401, description = "Invalid username or password")
    ),
    request_body = LoginValidator
)]
pub async fn login(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<LoginValidator>,
) -> Result<Response<TokenResponse>, ApiError> {
    let session = state
        .service
        .login(LoginInput {
            username: payload.username,
            password: payload.password,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(TokenResponse::from(session)))
}
