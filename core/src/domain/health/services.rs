use crate::domain::{
    authentication::ports::TokenRepository,
    common::{entities::app_errors::CoreError, services::Service},
    crypto::ports::HasherRepository,
    food_analysis::ports::{AnalysisRepository, LLMClient},
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    medical_profile::ports::MedicalProfileRepository,
    screening::ports::RescreenScheduler,
    storage::ports::ObjectStoragePort,
    user::ports::UserRepository,
};

impl<U, T, H, MP, A, LLM, OS, RS, HC> HealthCheckService for Service<U, T, H, MP, A, LLM, OS, RS, HC>
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
    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readiness().await
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }
}
