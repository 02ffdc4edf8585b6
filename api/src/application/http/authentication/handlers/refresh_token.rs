use axum::extract::State;
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use nutriguard_core::domain::authentication::ports::AuthService;

use crate::application::http::{
    authentication::handlers::login::TokenResponse,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/refresh-token",
    tag = "auth",
    summary = "Refresh tokens",
    description = "Takes the refresh token as the bearer credential and returns a new pair. Only the presented refresh token is revoked.",
    responses(
        (status = 200, body = TokenResponse),
        (status = 401, description = "Unknown, expired or non-refresh token")
    ),
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Response<TokenResponse>, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer
        .ok_or_else(|| ApiError::Unauthorized("Refresh token is missing".to_string()))?;

    let session = state
        .service
        .refresh_token(bearer.token().to_string())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(TokenResponse::from(session)))
}
