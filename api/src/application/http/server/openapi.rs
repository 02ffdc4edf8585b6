use utoipa::OpenApi;

use crate::application::http::{
    admin::router::AdminApiDoc, analysis::router::AnalysisApiDoc,
    authentication::router::AuthenticationApiDoc, health::router::HealthApiDoc,
    medical::router::MedicalApiDoc, user::router::UserApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NutriGuard API"
    ),
    nest(
        (path = "", api = AuthenticationApiDoc),
        (path = "", api = UserApiDoc),
        (path = "", api = MedicalApiDoc),
        (path = "", api = AnalysisApiDoc),
        (path = "/admin", api = AdminApiDoc),
        (path = "", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
