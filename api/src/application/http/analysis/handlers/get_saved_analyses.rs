use axum::extract::State;
use nutriguard_core::domain::food_analysis::ports::FoodAnalysisService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        analysis::forms::SavedAnalysisResponse,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SavedAnalysesResponse {
    pub analyses: Vec<SavedAnalysisResponse>,
}

#[utoipa::path(
    get,
    path = "/saved-analyses",
    tag = "analysis",
    summary = "List saved analyses",
    description = "The caller's saved analyses, newest first.",
    responses(
        (status = 200, body = SavedAnalysesResponse)
    ),
)]
pub async fn get_saved_analyses(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<SavedAnalysesResponse>, ApiError> {
    let analyses = state
        .service
        .list_analyses(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SavedAnalysesResponse {
        analyses: analyses.into_iter().map(SavedAnalysisResponse::from).collect(),
    }))
}
