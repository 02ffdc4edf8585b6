use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Free text lists, items separated by commas, semicolons, periods or whitespace.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMedicalDataValidator {
    #[serde(default)]
    pub contraindications: Option<String>,

    #[serde(default)]
    pub allergens: Option<String>,
}
