use axum::extract::{Path, State};
use nutriguard_core::domain::food_analysis::ports::FoodAnalysisService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteSavedAnalysisResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/saved-analyses/{analysis_id}",
    tag = "analysis",
    summary = "Delete a saved analysis",
    responses(
        (status = 200, body = DeleteSavedAnalysisResponse),
        (status = 404, description = "Analysis not found")
    ),
    params(
        ("analysis_id" = Uuid, Path, description = "Saved analysis ID"),
    ),
)]
pub async fn delete_saved_analysis(
    Path(analysis_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<DeleteSavedAnalysisResponse>, ApiError> {
    state
        .service
        .delete_analysis(identity, analysis_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteSavedAnalysisResponse {
        message: "Analysis deleted successfully".to_string(),
    }))
}
