use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    user::{
        entities::User,
        value_objects::{ChangePasswordInput, UpdateProfileInput, UpdateUserRoleInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn create_user(&self, user: User) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn get_by_id(&self, user_id: Uuid) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    fn get_by_username(
        &self,
        username: String,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    fn get_by_email(
        &self,
        email: String,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    /// Every user, newest first.
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, CoreError>> + Send;

    fn update_user(&self, user: User) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn delete_user(&self, user_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait UserService: Send + Sync {
    fn update_profile(
        &self,
        identity: Identity,
        input: UpdateProfileInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn change_password(
        &self,
        identity: Identity,
        input: ChangePasswordInput,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Removes the caller together with every image, analysis, profile and token they own.
    fn delete_account(&self, identity: Identity) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn list_users(&self, identity: Identity) -> impl Future<Output = Result<Vec<User>, CoreError>> + Send;

    fn update_user_role(
        &self,
        identity: Identity,
        input: UpdateUserRoleInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn delete_user(
        &self,
        identity: Identity,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait UserPolicy: Send + Sync {
    fn can_manage_account(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn can_administer_users(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}
