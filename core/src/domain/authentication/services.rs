use chrono::Duration;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    authentication::{
        entities::{AuthSession, TokenPair, TokenType, UserToken},
        ports::{AuthService, TokenRepository},
        value_objects::{AuthorizeRequestInput, Identity, LoginInput, RegisterInput},
    },
    common::{entities::app_errors::CoreError, services::Service},
    crypto::ports::HasherRepository,
    food_analysis::ports::{AnalysisRepository, LLMClient},
    health::ports::HealthCheckRepository,
    medical_profile::ports::MedicalProfileRepository,
    screening::ports::RescreenScheduler,
    storage::ports::ObjectStoragePort,
    user::{entities::User, ports::UserRepository},
};

impl<U, T, H, MP, A, LLM, OS, RS, HC> Service<U, T, H, MP, A, LLM, OS, RS, HC>
where
    T: TokenRepository,
{
    async fn issue_token_pair(&self, user_id: Uuid) -> Result<TokenPair, CoreError> {
        let (access_token, access) = UserToken::issue(
            user_id,
            TokenType::Access,
            Duration::minutes(self.token_config.access_token_ttl_minutes),
        );
        let (refresh_token, refresh) = UserToken::issue(
            user_id,
            TokenType::Refresh,
            Duration::days(self.token_config.refresh_token_ttl_days),
        );

        self.token_repository
            .create_tokens(vec![access, refresh])
            .await?;

        Ok(TokenPair::bearer(access_token, refresh_token))
    }
}

impl<U, T, H, MP, A, LLM, OS, RS, HC> AuthService for Service<U, T, H, MP, A, LLM, OS, RS, HC>
where
    U: UserRepository,
    T: TokenRepository,
    H: HasherRepository,
    MP: MedicalProfileRepository,
    A: AnalysisRepository,
    LLM: LLMClient,
    OS: ObjectStoragePort,
    RS: RescreenScheduler,
    HC: HealthCheckRepository,
{
    async fn register(&self, input: RegisterInput) -> Result<User, CoreError> {
        let username_taken = self
            .user_repository
            .get_by_username(input.username.clone())
            .await?
            .is_some();
        let email_taken = self
            .user_repository
            .get_by_email(input.email.clone())
            .await?
            .is_some();

        if username_taken || email_taken {
            return Err(CoreError::Conflict(
                "user with this username or email already exists".to_string(),
            ));
        }

        let password_hash = self.hasher_repository.hash_password(input.password).await?;
        let user = User::new(input.username, input.email, password_hash);

        let user = self.user_repository.create_user(user).await?;
        info!(user_id = %user.id, "Registered user");

        Ok(user)
    }

    async fn login(&self, input: LoginInput) -> Result<AuthSession, CoreError> {
        let user = self
            .user_repository
            .get_by_username(input.username)
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        let valid = self
            .hasher_repository
            .verify_password(input.password, user.password_hash.clone())
            .await?;
        if !valid {
            return Err(CoreError::InvalidCredentials);
        }

        self.token_repository.delete_by_user(user.id).await?;
        let tokens = self.issue_token_pair(user.id).await?;

        Ok(AuthSession { tokens, user })
    }

    async fn logout(&self, identity: Identity) -> Result<(), CoreError> {
        self.token_repository.delete_by_user(identity.id()).await?;

        Ok(())
    }

    async fn refresh_token(&self, refresh_token: String) -> Result<AuthSession, CoreError> {
        let token_hash = UserToken::digest(&refresh_token);

        let token = self
            .token_repository
            .get_valid_token(token_hash.clone(), TokenType::Refresh)
            .await?
            .ok_or(CoreError::InvalidToken)?;

        let user = self
            .user_repository
            .get_by_id(token.user_id)
            .await?
            .ok_or(CoreError::InvalidToken)?;

        self.token_repository.delete_by_hash(token_hash).await?;
        let tokens = self.issue_token_pair(user.id).await?;

        Ok(AuthSession { tokens, user })
    }

    async fn cleanup_expired_tokens(&self) -> Result<u64, CoreError> {
        let deleted = self.token_repository.delete_expired().await?;
        info!(deleted, "Removed expired tokens");

        Ok(deleted)
    }

    async fn authorize_request(&self, input: AuthorizeRequestInput) -> Result<Identity, CoreError> {
        let token = self
            .token_repository
            .get_valid_token(UserToken::digest(&input.token), TokenType::Access)
            .await?
            .ok_or(CoreError::InvalidToken)?;

        let user = self
            .user_repository
            .get_by_id(token.user_id)
            .await?
            .ok_or(CoreError::InvalidToken)?;

        Ok(Identity::new(user))
    }
}
