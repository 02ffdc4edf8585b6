use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    user::{entities::User, ports::UserRepository},
};
use crate::entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one(&self, column: UserColumn, value: String) -> Result<Option<User>, CoreError> {
        UserEntity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch user: {}", e);
                CoreError::InternalServerError
            })?
            .map(User::try_from)
            .transpose()
    }
}

impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, user: User) -> Result<User, CoreError> {
        UserEntity::insert(UserActiveModel {
            id: Set(user.id),
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            role: Set(user.role.to_string()),
            created_at: Set(user.created_at.naive_utc()),
        })
        .exec_with_returning(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to create user: {}", e);
            CoreError::InternalServerError
        })
        .and_then(User::try_from)
    }

    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, CoreError> {
        UserEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get user by id: {}", e);
                CoreError::InternalServerError
            })?
            .map(User::try_from)
            .transpose()
    }

    async fn get_by_username(&self, username: String) -> Result<Option<User>, CoreError> {
        self.find_one(UserColumn::Username, username).await
    }

    async fn get_by_email(&self, email: String) -> Result<Option<User>, CoreError> {
        self.find_one(UserColumn::Email, email).await
    }

    async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        UserEntity::find()
            .order_by_desc(UserColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list users: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn update_user(&self, user: User) -> Result<User, CoreError> {
        UserEntity::update(UserActiveModel {
            id: Set(user.id),
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            role: Set(user.role.to_string()),
            created_at: Set(user.created_at.naive_utc()),
        })
        .filter(UserColumn::Id.eq(user.id))
        .exec(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to update user: {}", e);
            CoreError::InternalServerError
        })
        .and_then(User::try_from)
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), CoreError> {
        UserEntity::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete user: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
