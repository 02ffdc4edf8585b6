use axum::{Json, extract::State, http::StatusCode};
use nutriguard_core::domain::health::{entities::DatabaseHealthStatus, ports::HealthCheckService};

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Pings the database and reports its response time. Answers 503 while the database is unreachable.",
    responses(
        (status = 200, body = DatabaseHealthStatus),
        (status = 503, body = DatabaseHealthStatus)
    ),
)]
pub async fn health_ready(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<DatabaseHealthStatus>), ApiError> {
    let status = state.service.readiness().await.map_err(ApiError::from)?;

    let code = if status.is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((code, Json(status)))
}
