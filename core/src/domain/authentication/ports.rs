use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    authentication::{
        entities::{AuthSession, TokenType, UserToken},
        value_objects::{AuthorizeRequestInput, Identity, LoginInput, RegisterInput},
    },
    common::entities::app_errors::CoreError,
    user::entities::User,
};

#[cfg_attr(test, mockall::automock)]
pub trait TokenRepository: Send + Sync {
    fn create_tokens(
        &self,
        tokens: Vec<UserToken>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Looks up a token of the given type by digest, ignoring expired ones.
    fn get_valid_token(
        &self,
        token_hash: String,
        token_type: TokenType,
    ) -> impl Future<Output = Result<Option<UserToken>, CoreError>> + Send;

    fn delete_by_hash(&self, token_hash: String) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete_by_user(&self, user_id: Uuid) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn delete_expired(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait AuthService: Send + Sync {
    fn register(&self, input: RegisterInput) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn login(&self, input: LoginInput) -> impl Future<Output = Result<AuthSession, CoreError>> + Send;

    fn logout(&self, identity: Identity) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn refresh_token(
        &self,
        refresh_token: String,
    ) -> impl Future<Output = Result<AuthSession, CoreError>> + Send;

    fn cleanup_expired_tokens(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn authorize_request(
        &self,
        input: AuthorizeRequestInput,
    ) -> impl Future<Output = Result<Identity, CoreError>> + Send;
}
