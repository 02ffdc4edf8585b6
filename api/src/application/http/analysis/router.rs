use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
};
use nutriguard_core::domain::food_analysis::entities::MAX_IMAGE_SIZE;
use utoipa::OpenApi;

use super::handlers::{
    analyze_image::{__path_analyze_image, analyze_image},
    delete_saved_analysis::{__path_delete_saved_analysis, delete_saved_analysis},
    get_saved_analyses::{__path_get_saved_analyses, get_saved_analyses},
    reanalyze_analysis::{__path_reanalyze_analysis, reanalyze_analysis},
    save_analysis::{__path_save_analysis, save_analysis},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

/// Room for the multipart framing and text fields around a maximum size image.
const FORM_OVERHEAD: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(
    analyze_image,
    save_analysis,
    get_saved_analyses,
    reanalyze_analysis,
    delete_saved_analysis
))]
pub struct AnalysisApiDoc;

pub fn analysis_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/analyze-image"), post(analyze_image))
        .route(&format!("{root_path}/save-analysis"), post(save_analysis))
        .route(&format!("{root_path}/saved-analyses"), get(get_saved_analyses))
        .route(
            &format!("{root_path}/reanalyze-analysis/{{analysis_id}}"),
            post(reanalyze_analysis),
        )
        .route(
            &format!("{root_path}/saved-analyses/{{analysis_id}}"),
            delete(delete_saved_analysis),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + FORM_OVERHEAD))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
