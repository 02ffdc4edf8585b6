use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    cleanup_tokens::{__path_cleanup_tokens, cleanup_tokens},
    login::{__path_login, login},
    logout::{__path_logout, logout},
    me::{__path_me, me},
    refresh_token::{__path_refresh_token, refresh_token},
    register::{__path_register, register},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(register, login, logout, me, refresh_token, cleanup_tokens))]
pub struct AuthenticationApiDoc;

pub fn authentication_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/register"), post(register))
        .route(&format!("{root_path}/login"), post(login))
        .route(&format!("{root_path}/logout"), post(logout))
        .route(&format!("{root_path}/me"), get(me))
        .route(&format!("{root_path}/refresh-token"), post(refresh_token))
        .route(&format!("{root_path}/cleanup-tokens"), post(cleanup_tokens))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
