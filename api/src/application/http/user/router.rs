use axum::{
    Router, middleware,
    routing::{delete, post},
};
use utoipa::OpenApi;

use super::handlers::{
    change_password::{__path_change_password, change_password},
    delete_account::{__path_delete_account, delete_account},
    update_profile::{__path_update_profile, update_profile},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(update_profile, change_password, delete_account))]
pub struct UserApiDoc;

pub fn user_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/update-profile"), post(update_profile))
        .route(&format!("{root_path}/change-password"), post(change_password))
        .route(&format!("{root_path}/delete-account"), delete(delete_account))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
