use axum::extract::{Multipart, State};
use nutriguard_core::domain::food_analysis::{
    entities::AnalysisResult, ports::FoodAnalysisService, value_objects::AnalyzeImageInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        analysis::forms::ImageForm,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeImageForm {
    #[schema(format = Binary, value_type = String)]
    pub image: String,
}

#[utoipa::path(
    post,
    path = "/analyze-image",
    tag = "analysis",
    summary = "Analyze a food photo",
    description = "Asks the vision model for the ingredients in the photo and flags the ones matching the caller's allergens or contraindications. Nothing is stored.",
    request_body(content = AnalyzeImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalysisResult),
        (status = 400, description = "Unsupported, empty, oversized or undecodable image"),
        (status = 504, description = "The vision model did not answer in time")
    ),
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    multipart: Multipart,
) -> Result<Response<AnalysisResult>, ApiError> {
    let image = ImageForm::read(multipart).await?.require_image()?;

    let result = state
        .service
        .analyze_image(
            identity,
            AnalyzeImageInput {
                image_data: image.data,
                content_type: image.content_type,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
