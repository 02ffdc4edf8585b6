use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RootResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    summary = "Service banner",
    responses(
        (status = 200, body = RootResponse)
    ),
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Backend is running!".to_string(),
    })
}
