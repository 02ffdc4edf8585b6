use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    get_medical_data::{__path_get_medical_data, get_medical_data},
    update_medical_data::{__path_update_medical_data, update_medical_data},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(get_medical_data, update_medical_data))]
pub struct MedicalApiDoc;

pub fn medical_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/medical-data", state.args.server.root_path),
            get(get_medical_data).post(update_medical_data),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
