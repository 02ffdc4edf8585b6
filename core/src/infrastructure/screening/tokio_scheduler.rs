use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::ports::AnalysisRepository,
    medical_profile::ports::MedicalProfileRepository,
    screening::{entities::RescreenTicket, ports::RescreenScheduler, services::rescreen_all_for_user},
};

/// Spawns each bulk rescreen as its own task on the current tokio runtime.
///
/// No queue, no retry: one submission is one task.
pub struct TokioRescreenScheduler<MP, A> {
    medical_profile_repository: Arc<MP>,
    analysis_repository: Arc<A>,
}

impl<MP, A> Clone for TokioRescreenScheduler<MP, A> {
    fn clone(&self) -> Self {
        Self {
            medical_profile_repository: Arc::clone(&self.medical_profile_repository),
            analysis_repository: Arc::clone(&self.analysis_repository),
        }
    }
}

impl<MP, A> TokioRescreenScheduler<MP, A> {
    pub fn new(medical_profile_repository: MP, analysis_repository: A) -> Self {
        Self {
            medical_profile_repository: Arc::new(medical_profile_repository),
            analysis_repository: Arc::new(analysis_repository),
        }
    }
}

impl<MP, A> RescreenScheduler for TokioRescreenScheduler<MP, A>
where
    MP: MedicalProfileRepository + 'static,
    A: AnalysisRepository + 'static,
{
    fn schedule_rescreen(&self, user_id: Uuid) -> Result<RescreenTicket, CoreError> {
        let runtime = Handle::try_current().map_err(|e| {
            error!(user_id = %user_id, "No runtime to run the rescreen on: {}", e);
            CoreError::InternalServerError
        })?;

        let medical_profile_repository = Arc::clone(&self.medical_profile_repository);
        let analysis_repository = Arc::clone(&self.analysis_repository);

        let handle = runtime.spawn(async move {
            let result = rescreen_all_for_user(
                medical_profile_repository.as_ref(),
                analysis_repository.as_ref(),
                user_id,
            )
            .await;

            match &result {
                Ok(count) => info!(user_id = %user_id, count, "Background rescreen finished"),
                Err(e) => error!(user_id = %user_id, "Background rescreen failed: {}", e),
            }

            result
        });

        Ok(RescreenTicket::new(user_id, handle))
    }
}
