use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Both fields are optional; blank values are ignored after trimming.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileValidator {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordValidator {
    #[validate(length(min = 1, message = "old_password is required"))]
    pub old_password: String,

    pub new_password: String,

    pub confirm_password: String,
}
