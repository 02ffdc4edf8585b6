use axum::extract::State;
use nutriguard_core::domain::medical_profile::{
    entities::MedicalProfile, ports::MedicalProfileService,
    value_objects::UpdateMedicalProfileInput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        medical::validators::UpdateMedicalDataValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/medical-data",
    tag = "medical",
    summary = "Save medical data",
    description = "Stores the caller's allergens and contraindications, then re-checks every saved analysis in the background.",
    responses(
        (status = 200, body = MedicalProfile)
    ),
    request_body = UpdateMedicalDataValidator
)]
pub async fn update_medical_data(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateMedicalDataValidator>,
) -> Result<Response<MedicalProfile>, ApiError> {
    let profile = state
        .service
        .update_medical_profile(
            identity,
            UpdateMedicalProfileInput {
                contraindications: payload.contraindications,
                allergens: payload.allergens,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(profile))
}
