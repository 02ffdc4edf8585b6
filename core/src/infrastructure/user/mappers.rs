use chrono::{TimeZone, Utc};
use tracing::error;

use crate::domain::{common::entities::app_errors::CoreError, user::entities::User};
use crate::entity::users::Model as UserModel;

impl TryFrom<UserModel> for User {
    type Error = CoreError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role = model.role.parse().map_err(|_| {
            error!(user_id = %model.id, role = %model.role, "Unknown role stored for user");
            CoreError::InternalServerError
        })?;

        Ok(User {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            role,
            created_at: Utc.from_utc_datetime(&model.created_at),
        })
    }
}
