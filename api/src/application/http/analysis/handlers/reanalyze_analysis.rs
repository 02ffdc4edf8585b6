use axum::extract::{Path, State};
use nutriguard_core::domain::screening::ports::RescreenService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

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
pub struct ReanalyzeResponse {
    #[serde(flatten)]
    pub analysis: SavedAnalysisResponse,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/reanalyze-analysis/{analysis_id}",
    tag = "analysis",
    summary = "Re-check a saved analysis",
    description = "Recomputes the flags and warnings of a saved analysis against the caller's current medical data. The vision model is not called again.",
    responses(
        (status = 200, body = ReanalyzeResponse),
        (status = 400, description = "Stored analysis is malformed"),
        (status = 404, description = "Analysis not found")
    ),
    params(
        ("analysis_id" = Uuid, Path, description = "Saved analysis ID"),
    ),
)]
pub async fn reanalyze_analysis(
    Path(analysis_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<ReanalyzeResponse>, ApiError> {
    let details = state
        .service
        .rescreen_analysis(identity, analysis_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ReanalyzeResponse {
        analysis: SavedAnalysisResponse::from(details),
        message: "Analysis re-checked against the updated medical data".to_string(),
    }))
}
