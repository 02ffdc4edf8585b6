use axum::extract::{Multipart, State};
use nutriguard_core::domain::food_analysis::{
    ports::FoodAnalysisService, value_objects::SaveAnalysisInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        analysis::forms::{ImageForm, SavedAnalysisResponse},
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveAnalysisForm {
    #[schema(format = Binary, value_type = String)]
    pub image: String,
    /// JSON text of the analysis as returned by `/analyze-image`.
    pub analysis_result: String,
    pub ingredients_count: i32,
    pub warnings_count: i32,
}

#[utoipa::path(
    post,
    path = "/save-analysis",
    tag = "analysis",
    summary = "Save an analysis",
    description = "Stores the photo and the analysis shown to the user. The response carries a link to the photo valid for one hour.",
    request_body(content = SaveAnalysisForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = SavedAnalysisResponse),
        (status = 400, description = "Invalid analysis, counts that disagree with it, missing field or empty image")
    ),
)]
pub async fn save_analysis(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    multipart: Multipart,
) -> Result<Response<SavedAnalysisResponse>, ApiError> {
    let mut form = ImageForm::read(multipart).await?;
    let image = form.require_image()?;
    let analysis_result = form.require_text("analysis_result")?;
    let ingredients_count = form.require_count("ingredients_count")?;
    let warnings_count = form.require_count("warnings_count")?;

    let details = state
        .service
        .save_analysis(
            identity,
            SaveAnalysisInput {
                image_data: image.data,
                filename: image.filename,
                content_type: image.content_type,
                analysis_result,
                ingredients_count,
                warnings_count,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SavedAnalysisResponse::from(details)))
}
