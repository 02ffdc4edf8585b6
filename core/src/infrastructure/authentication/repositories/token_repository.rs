use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    authentication::{
        entities::{TokenType, UserToken},
        ports::TokenRepository,
    },
    common::entities::app_errors::CoreError,
};
use crate::entity::user_tokens::{
    ActiveModel as UserTokenActiveModel, Column as UserTokenColumn, Entity as UserTokenEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresTokenRepository {
    pub db: DatabaseConnection,
}

impl PostgresTokenRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TokenRepository for PostgresTokenRepository {
    async fn create_tokens(&self, tokens: Vec<UserToken>) -> Result<(), CoreError> {
        let models = tokens.into_iter().map(|token| UserTokenActiveModel {
            id: Set(token.id),
            user_id: Set(token.user_id),
            token_hash: Set(token.token_hash),
            token_type: Set(token.token_type.to_string()),
            created_at: Set(token.created_at.naive_utc()),
            expires_at: Set(token.expires_at.naive_utc()),
        });

        UserTokenEntity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to store tokens: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }

    async fn get_valid_token(
        &self,
        token_hash: String,
        token_type: TokenType,
    ) -> Result<Option<UserToken>, CoreError> {
        UserTokenEntity::find()
            .filter(UserTokenColumn::TokenHash.eq(token_hash))
            .filter(UserTokenColumn::TokenType.eq(token_type.to_string()))
            .filter(UserTokenColumn::ExpiresAt.gt(Utc::now().naive_utc()))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to look up token: {}", e);
                CoreError::InternalServerError
            })?
            .map(UserToken::try_from)
            .transpose()
    }

    async fn delete_by_hash(&self, token_hash: String) -> Result<(), CoreError> {
        UserTokenEntity::delete_many()
            .filter(UserTokenColumn::TokenHash.eq(token_hash))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete token: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<u64, CoreError> {
        let result = UserTokenEntity::delete_many()
            .filter(UserTokenColumn::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete user tokens: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(result.rows_affected)
    }

    async fn delete_expired(&self) -> Result<u64, CoreError> {
        let result = UserTokenEntity::delete_many()
            .filter(UserTokenColumn::ExpiresAt.lte(Utc::now().naive_utc()))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete expired tokens: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(result.rows_affected)
    }
}
