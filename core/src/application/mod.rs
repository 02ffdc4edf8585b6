use std::time::Duration;

use tracing::info;

use crate::domain::{
    authentication::ports::AuthService,
    common::{NutriguardConfig, services::Service},
    storage::ports::ObjectStoragePort,
};
use crate::infrastructure::{
    authentication::repositories::token_repository::PostgresTokenRepository,
    crypto::argon2_hasher::Argon2Hasher,
    db::postgres::Postgres,
    food_analysis::repositories::analysis_repository::PostgresAnalysisRepository,
    health::repositories::PostgresHealthCheckRepository,
    llm::ollama_client::OllamaLLMClient,
    medical_profile::repositories::medical_profile_repository::PostgresMedicalProfileRepository,
    object_storage::minio::MinioObjectStorage,
    screening::tokio_scheduler::TokioRescreenScheduler,
    user::repositories::user_repository::PostgresUserRepository,
};

pub type NutriguardService = Service<
    PostgresUserRepository,
    PostgresTokenRepository,
    Argon2Hasher,
    PostgresMedicalProfileRepository,
    PostgresAnalysisRepository,
    OllamaLLMClient,
    MinioObjectStorage,
    TokioRescreenScheduler<PostgresMedicalProfileRepository, PostgresAnalysisRepository>,
    PostgresHealthCheckRepository,
>;

/// Connects every adapter and prepares the process: the image bucket is
/// created if missing and expired tokens are purged.
pub async fn create_service(config: NutriguardConfig) -> Result<NutriguardService, anyhow::Error> {
    let postgres = Postgres::new(&config.database).await?;
    let db = postgres.get_db();

    let medical_profile_repository = PostgresMedicalProfileRepository::new(db.clone());
    let analysis_repository = PostgresAnalysisRepository::new(db.clone());
    let rescreen_scheduler =
        TokioRescreenScheduler::new(medical_profile_repository.clone(), analysis_repository.clone());

    let object_storage = MinioObjectStorage::new(&config.object_storage);
    object_storage.ensure_bucket().await?;

    let llm_client = OllamaLLMClient::new(&config.llm)?;

    let service = Service::new(
        PostgresUserRepository::new(db.clone()),
        PostgresTokenRepository::new(db.clone()),
        Argon2Hasher::new(),
        medical_profile_repository,
        analysis_repository,
        llm_client,
        object_storage,
        rescreen_scheduler,
        PostgresHealthCheckRepository::new(db),
        config.tokens.clone(),
        Duration::from_secs(config.llm.timeout_seconds),
    );

    let removed = service.cleanup_expired_tokens().await?;
    info!(removed, "Expired tokens removed at startup");

    Ok(service)
}
