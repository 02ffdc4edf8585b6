use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    authentication::{ports::TokenRepository, value_objects::Identity},
    common::{entities::app_errors::CoreError, policies::ensure_policy, services::Service},
    crypto::ports::HasherRepository,
    food_analysis::{
        entities::{SavedAnalysis, SavedAnalysisDetails},
        ports::{AnalysisRepository, FoodAnalysisPolicy, LLMClient},
    },
    health::ports::HealthCheckRepository,
    medical_profile::ports::MedicalProfileRepository,
    screening::{
        ports::{RescreenScheduler, RescreenService},
        rescreener::rescreen,
        token_set::TokenSet,
    },
    storage::ports::ObjectStoragePort,
    user::ports::UserRepository,
};

/// Allergen and contraindication tokens of a user's current profile.
async fn load_token_sets<MP>(
    medical_profile_repository: &MP,
    user_id: Uuid,
) -> Result<Option<(TokenSet, TokenSet)>, CoreError>
where
    MP: MedicalProfileRepository,
{
    let profile = medical_profile_repository.fetch_by_user(user_id).await?;

    Ok(profile.map(|p| (p.allergen_tokens(), p.contraindication_tokens())))
}

async fn apply_rescreen<A>(
    analysis_repository: &A,
    analysis: &SavedAnalysis,
    allergens: &TokenSet,
    contraindications: &TokenSet,
) -> Result<SavedAnalysis, CoreError>
where
    A: AnalysisRepository,
{
    let updated = rescreen(&analysis.analysis_result, allergens, contraindications)?;
    let payload = updated.to_payload()?;

    analysis_repository
        .update_result(analysis.id, payload, updated.warnings_count)
        .await
}

/// Rescreens one analysis owned by `user_id` against the current profile.
///
/// Without a profile every flag comes out false.
pub async fn rescreen_saved_analysis<MP, A>(
    medical_profile_repository: &MP,
    analysis_repository: &A,
    analysis_id: Uuid,
    user_id: Uuid,
) -> Result<SavedAnalysis, CoreError>
where
    MP: MedicalProfileRepository,
    A: AnalysisRepository,
{
    let analysis = analysis_repository
        .fetch_by_id(analysis_id, user_id)
        .await?
        .ok_or(CoreError::NotFound)?;

    let (allergens, contraindications) = load_token_sets(medical_profile_repository, user_id)
        .await?
        .unwrap_or_default();

    apply_rescreen(analysis_repository, &analysis, &allergens, &contraindications).await
}

/// Rescreens every analysis of `user_id` and returns how many were attempted.
///
/// A user without a medical profile is left untouched. Records that fail to
/// parse or to persist are logged and skipped; earlier updates are kept.
pub async fn rescreen_all_for_user<MP, A>(
    medical_profile_repository: &MP,
    analysis_repository: &A,
    user_id: Uuid,
) -> Result<usize, CoreError>
where
    MP: MedicalProfileRepository,
    A: AnalysisRepository,
{
    let Some((allergens, contraindications)) =
        load_token_sets(medical_profile_repository, user_id).await?
    else {
        info!(user_id = %user_id, "No medical profile, skipping rescreen");
        return Ok(0);
    };

    let analyses = analysis_repository.fetch_by_user(user_id).await?;

    for analysis in &analyses {
        if let Err(e) =
            apply_rescreen(analysis_repository, analysis, &allergens, &contraindications).await
        {
            warn!(
                user_id = %user_id,
                analysis_id = %analysis.id,
                "Skipping analysis during rescreen: {}",
                e
            );
        }
    }

    info!(user_id = %user_id, count = analyses.len(), "Rescreened saved analyses");

    Ok(analyses.len())
}

impl<U, T, H, MP, A, LLM, OS, RS, HC> RescreenService for Service<U, T, H, MP, A, LLM, OS, RS, HC>
where
    U: UserRepository,
    T: TokenRepository,
    H: HasherRepository,
    MP: MedicalProfileRepository,
    A: AnalysisRepository,
    LLM: LLMClient,
    OS: ObjectStoragePort,
    RS: RescreenScheduler,
    HC: HealthCheckRepository,
{
    async fn rescreen_analysis(
        &self,
        identity: Identity,
        analysis_id: Uuid,
    ) -> Result<SavedAnalysisDetails, CoreError> {
        ensure_policy(
            self.policy.can_manage_analyses(identity.clone()).await,
            "insufficient permissions",
        )?;

        let analysis = rescreen_saved_analysis(
            &self.medical_profile_repository,
            &self.analysis_repository,
            analysis_id,
            identity.id(),
        )
        .await?;

        Ok(self.with_image_url(analysis).await)
    }

    async fn rescreen_all_for_user(&self, user_id: Uuid) -> Result<usize, CoreError> {
        rescreen_all_for_user(
            &self.medical_profile_repository,
            &self.analysis_repository,
            user_id,
        )
        .await
    }
}
