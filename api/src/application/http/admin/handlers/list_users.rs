use axum::extract::State;
use nutriguard_core::domain::user::{entities::User, ports::UserService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "admin",
    summary = "List users",
    description = "Every user, newest first. Admins only.",
    responses(
        (status = 200, body = ListUsersResponse),
        (status = 403, description = "Caller is not an admin")
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<ListUsersResponse>, ApiError> {
    let users = state
        .service
        .list_users(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ListUsersResponse { users }))
}
