use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRoleValidator {
    pub user_id: Uuid,

    /// One of `user`, `admin`, `banned`.
    #[validate(length(min = 1, message = "new_role is required"))]
    pub new_role: String,
}
