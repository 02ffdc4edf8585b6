use chrono::{TimeZone, Utc};
use tracing::error;

use crate::domain::{authentication::entities::UserToken, common::entities::app_errors::CoreError};
use crate::entity::user_tokens::Model as UserTokenModel;

impl TryFrom<UserTokenModel> for UserToken {
    type Error = CoreError;

    fn try_from(model: UserTokenModel) -> Result<Self, Self::Error> {
        let token_type = model.token_type.parse().map_err(|_| {
            error!(token_id = %model.id, "Unknown token type stored: {}", model.token_type);
            CoreError::InternalServerError
        })?;

        Ok(UserToken {
            id: model.id,
            user_id: model.user_id,
            token_hash: model.token_hash,
            token_type,
            created_at: Utc.from_utc_datetime(&model.created_at),
            expires_at: Utc.from_utc_datetime(&model.expires_at),
        })
    }
}
