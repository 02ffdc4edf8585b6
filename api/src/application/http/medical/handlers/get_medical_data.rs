use axum::extract::State;
use nutriguard_core::domain::medical_profile::{
    entities::MedicalProfile, ports::MedicalProfileService,
};

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/medical-data",
    tag = "medical",
    summary = "Get medical data",
    description = "Returns the caller's allergens and contraindications. A caller without a stored profile gets an empty one.",
    responses(
        (status = 200, body = MedicalProfile)
    ),
)]
pub async fn get_medical_data(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<MedicalProfile>, ApiError> {
    let profile = state
        .service
        .get_medical_profile(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(profile))
}
