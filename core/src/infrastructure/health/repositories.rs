use std::time::Instant;

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
};

#[derive(Debug, Clone)]
pub struct PostgresHealthCheckRepository {
    pub db: DatabaseConnection,
}

impl PostgresHealthCheckRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn select_one(&self) -> Result<(), sea_orm::DbErr> {
        let backend = self.db.get_database_backend();
        self.db
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await
            .map(|_| ())
    }
}

impl HealthCheckRepository for PostgresHealthCheckRepository {
    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        let start = Instant::now();
        let outcome = self.select_one().await;
        let response_time_ms = start.elapsed().as_millis() as u64;

        Ok(match outcome {
            Ok(()) => DatabaseHealthStatus {
                is_healthy: true,
                response_time_ms,
                error: None,
            },
            Err(e) => {
                error!("Database readiness check failed: {}", e);
                DatabaseHealthStatus {
                    is_healthy: false,
                    response_time_ms,
                    error: Some(e.to_string()),
                }
            }
        })
    }

    async fn health(&self) -> Result<u64, CoreError> {
        let start = Instant::now();
        self.select_one().await.map_err(|e| {
            error!("Database health check failed: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(start.elapsed().as_millis() as u64)
    }
}
