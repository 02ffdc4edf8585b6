use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    delete_user::{__path_delete_user, delete_user},
    list_users::{__path_list_users, list_users},
    update_user_role::{__path_update_user_role, update_user_role},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(list_users, update_user_role, delete_user))]
pub struct AdminApiDoc;

pub fn admin_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/admin/users"), get(list_users))
        .route(
            &format!("{root_path}/admin/update-user-role"),
            post(update_user_role),
        )
        .route(
            &format!("{root_path}/admin/users/{{user_id}}"),
            delete(delete_user),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
