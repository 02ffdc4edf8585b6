use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use nutriguard_core::domain::authentication::{
    ports::AuthService,
    value_objects::{AuthorizeRequestInput, Identity},
};
use tracing::debug;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

/// Resolves a bearer access token to an [`Identity`] and stores it in the
/// request extensions. Requests without a valid token pass through
/// untouched; [`RequiredIdentity`] rejects them where a caller is needed.
pub async fn auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(auth_header) = req.headers().get("authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && !token.is_empty()
    {
        match state
            .service
            .authorize_request(AuthorizeRequestInput {
                token: token.to_string(),
            })
            .await
        {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
            }
            Err(e) => debug!("Bearer token rejected: {}", e),
        }
    }

    next.run(req).await
}

/// Extractor for handlers that need an authenticated caller.
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(RequiredIdentity)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
