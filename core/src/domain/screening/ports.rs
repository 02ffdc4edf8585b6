use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    food_analysis::entities::SavedAnalysisDetails,
    screening::entities::RescreenTicket,
};

/// Runs bulk rescreens outside of the request that asked for them.
#[cfg_attr(test, mockall::automock)]
pub trait RescreenScheduler: Send + Sync {
    /// Submits exactly one run for `user_id` and returns without waiting for it.
    fn schedule_rescreen(&self, user_id: Uuid) -> Result<RescreenTicket, CoreError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RescreenService: Send + Sync {
    fn rescreen_analysis(
        &self,
        identity: Identity,
        analysis_id: Uuid,
    ) -> impl Future<Output = Result<SavedAnalysisDetails, CoreError>> + Send;

    fn rescreen_all_for_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<usize, CoreError>> + Send;
}
