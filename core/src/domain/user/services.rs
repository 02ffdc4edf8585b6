use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    authentication::{ports::TokenRepository, value_objects::Identity},
    common::{entities::app_errors::CoreError, policies::ensure_policy, services::Service},
    crypto::ports::HasherRepository,
    food_analysis::ports::{AnalysisRepository, LLMClient},
    health::ports::HealthCheckRepository,
    medical_profile::ports::MedicalProfileRepository,
    screening::ports::RescreenScheduler,
    storage::ports::ObjectStoragePort,
    user::{
        entities::{User, UserRole},
        ports::{UserPolicy, UserRepository, UserService},
        value_objects::{
            ChangePasswordInput, MIN_PASSWORD_LENGTH, UpdateProfileInput, UpdateUserRoleInput,
        },
    },
};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<U, T, H, MP, A, LLM, OS, RS, HC> Service<U, T, H, MP, A, LLM, OS, RS, HC>
where
    U: UserRepository,
    T: TokenRepository,
    MP: MedicalProfileRepository,
    A: AnalysisRepository,
    OS: ObjectStoragePort,
{
    /// Deletes a user and everything they own. Image removal is best effort.
    pub(crate) async fn purge_user(&self, user_id: Uuid) -> Result<(), CoreError> {
        let analyses = self.analysis_repository.fetch_by_user(user_id).await?;
        for analysis in &analyses {
            if let Err(e) = self.object_storage.delete_object(&analysis.image_path).await {
                warn!(user_id = %user_id, analysis_id = %analysis.id, "Failed to delete image: {}", e);
            }
        }

        self.analysis_repository.delete_by_user(user_id).await?;
        self.medical_profile_repository.delete_by_user(user_id).await?;
        self.token_repository.delete_by_user(user_id).await?;
        self.user_repository.delete_user(user_id).await?;

        info!(user_id = %user_id, analyses = analyses.len(), "Deleted user and owned data");

        Ok(())
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User, CoreError> {
        self.user_repository
            .get_by_id(user_id)
            .await?
            .ok_or(CoreError::NotFound)
    }
}

impl<U, T, H, MP, A, LLM, OS, RS, HC> UserService for Service<U, T, H, MP, A, LLM, OS, RS, HC>
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
    async fn update_profile(
        &self,
        identity: Identity,
        input: UpdateProfileInput,
    ) -> Result<User, CoreError> {
        ensure_policy(
            self.policy.can_manage_account(identity.clone()).await,
            "insufficient permissions",
        )?;

        if input.username.is_none() && input.email.is_none() {
            return Err(CoreError::Invalid("no data to update".to_string()));
        }

        let username = non_blank(input.username);
        let email = non_blank(input.email);

        if let Some(username) = &username
            && let Some(existing) = self.user_repository.get_by_username(username.clone()).await?
            && existing.id != identity.id()
        {
            return Err(CoreError::Conflict("username is already taken".to_string()));
        }

        if let Some(email) = &email
            && let Some(existing) = self.user_repository.get_by_email(email.clone()).await?
            && existing.id != identity.id()
        {
            return Err(CoreError::Conflict("email is already taken".to_string()));
        }

        if username.is_none() && email.is_none() {
            return Err(CoreError::Invalid("no valid data to update".to_string()));
        }

        let mut user = self.load_user(identity.id()).await?;
        if let Some(username) = username {
            user.username = username;
        }
        if let Some(email) = email {
            user.email = email;
        }

        self.user_repository.update_user(user).await
    }

    async fn change_password(
        &self,
        identity: Identity,
        input: ChangePasswordInput,
    ) -> Result<(), CoreError> {
        ensure_policy(
            self.policy.can_manage_account(identity.clone()).await,
            "insufficient permissions",
        )?;

        if input.new_password != input.confirm_password {
            return Err(CoreError::Invalid("new passwords do not match".to_string()));
        }

        if input.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CoreError::Invalid(format!(
                "new password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }

        let mut user = self.load_user(identity.id()).await?;

        let old_password_matches = self
            .hasher_repository
            .verify_password(input.old_password, user.password_hash.clone())
            .await?;
        if !old_password_matches {
            return Err(CoreError::Invalid("old password is incorrect".to_string()));
        }

        user.password_hash = self.hasher_repository.hash_password(input.new_password).await?;
        self.user_repository.update_user(user).await?;

        Ok(())
    }

    async fn delete_account(&self, identity: Identity) -> Result<(), CoreError> {
        ensure_policy(
            self.policy.can_manage_account(identity.clone()).await,
            "insufficient permissions",
        )?;

        self.purge_user(identity.id()).await
    }

    async fn list_users(&self, identity: Identity) -> Result<Vec<User>, CoreError> {
        ensure_policy(
            self.policy.can_administer_users(identity).await,
            "admin rights required",
        )?;

        self.user_repository.list_users().await
    }

    async fn update_user_role(
        &self,
        identity: Identity,
        input: UpdateUserRoleInput,
    ) -> Result<User, CoreError> {
        ensure_policy(
            self.policy.can_administer_users(identity.clone()).await,
            "admin rights required",
        )?;

        if input.user_id == identity.id() {
            return Err(CoreError::Invalid("you cannot change your own role".to_string()));
        }

        let role: UserRole = input.role.parse()?;

        let mut user = self.load_user(input.user_id).await?;
        user.role = role;
        let user = self.user_repository.update_user(user).await?;

        info!(
            admin_id = %identity.id(),
            user_id = %user.id,
            role = %user.role,
            "Changed user role"
        );

        Ok(user)
    }

    async fn delete_user(&self, identity: Identity, user_id: Uuid) -> Result<(), CoreError> {
        ensure_policy(
            self.policy.can_administer_users(identity.clone()).await,
            "admin rights required",
        )?;

        if user_id == identity.id() {
            return Err(CoreError::Invalid("you cannot delete your own account".to_string()));
        }

        self.load_user(user_id).await?;

        self.purge_user(user_id).await
    }
}
