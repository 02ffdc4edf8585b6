use tracing::{error, info};

use crate::domain::{
    authentication::{ports::TokenRepository, value_objects::Identity},
    common::{entities::app_errors::CoreError, policies::ensure_policy, services::Service},
    crypto::ports::HasherRepository,
    food_analysis::ports::{AnalysisRepository, LLMClient},
    health::ports::HealthCheckRepository,
    medical_profile::{
        entities::MedicalProfile,
        ports::{MedicalProfilePolicy, MedicalProfileRepository, MedicalProfileService},
        value_objects::UpdateMedicalProfileInput,
    },
    screening::ports::RescreenScheduler,
    storage::ports::ObjectStoragePort,
    user::ports::UserRepository,
};

impl<U, T, H, MP, A, LLM, OS, RS, HC> MedicalProfileService
    for Service<U, T, H, MP, A, LLM, OS, RS, HC>
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
    async fn get_medical_profile(&self, identity: Identity) -> Result<MedicalProfile, CoreError> {
        ensure_policy(
            self.policy.can_manage_medical_profile(identity.clone()).await,
            "insufficient permissions",
        )?;

        let profile = self
            .medical_profile_repository
            .fetch_by_user(identity.id())
            .await?
            .unwrap_or_else(|| MedicalProfile::empty(identity.id()));

        Ok(profile)
    }

    async fn update_medical_profile(
        &self,
        identity: Identity,
        input: UpdateMedicalProfileInput,
    ) -> Result<MedicalProfile, CoreError> {
        ensure_policy(
            self.policy.can_manage_medical_profile(identity.clone()).await,
            "insufficient permissions",
        )?;

        let profile = MedicalProfile::new(identity.id(), input.contraindications, input.allergens);
        let profile = self.medical_profile_repository.upsert(profile).await?;

        // Dropping the ticket detaches the run from this request.
        match self.rescreen_scheduler.schedule_rescreen(identity.id()) {
            Ok(_ticket) => info!(user_id = %identity.id(), "Scheduled rescreen of saved analyses"),
            Err(e) => error!(user_id = %identity.id(), "Failed to schedule rescreen: {}", e),
        }

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        domain::{
            screening::{entities::RescreenTicket, ports::MockRescreenScheduler},
            user::entities::UserRole,
        },
        testing::{Fixtures, identity_of, user_with_role},
    };

    fn update(allergens: &str) -> UpdateMedicalProfileInput {
        UpdateMedicalProfileInput {
            contraindications: None,
            allergens: Some(allergens.to_string()),
        }
    }

    #[tokio::test]
    async fn missing_profile_reads_as_empty() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));

        let profile = fixtures
            .service()
            .get_medical_profile(identity_of(&user))
            .await
            .unwrap();

        assert_eq!(profile.user_id, user.id);
        assert_eq!(profile.allergens, None);
        assert_eq!(profile.contraindications, None);
    }

    #[tokio::test]
    async fn update_upserts_and_schedules_exactly_one_rescreen() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));

        let mut scheduler = MockRescreenScheduler::new();
        scheduler
            .expect_schedule_rescreen()
            .with(eq(user.id))
            .times(1)
            .returning(|user_id| Ok(RescreenTicket::new(user_id, tokio::spawn(async { Ok(0) }))));
        let service = fixtures.service_with_scheduler(scheduler);

        let profile = service
            .update_medical_profile(identity_of(&user), update("peanut"))
            .await
            .unwrap();

        assert_eq!(profile.allergens.as_deref(), Some("peanut"));
        assert_eq!(fixtures.profiles.get(user.id).unwrap(), profile);
    }

    #[tokio::test]
    async fn second_update_keeps_the_same_record() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));

        let mut scheduler = MockRescreenScheduler::new();
        scheduler
            .expect_schedule_rescreen()
            .times(2)
            .returning(|user_id| Ok(RescreenTicket::new(user_id, tokio::spawn(async { Ok(0) }))));
        let service = fixtures.service_with_scheduler(scheduler);

        let first = service
            .update_medical_profile(identity_of(&user), update("milk"))
            .await
            .unwrap();
        let second = service
            .update_medical_profile(identity_of(&user), update("egg"))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(
            fixtures.profiles.get(user.id).unwrap().allergens.as_deref(),
            Some("egg")
        );
    }

    #[tokio::test]
    async fn scheduling_failure_does_not_fail_the_update() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));

        let mut scheduler = MockRescreenScheduler::new();
        scheduler
            .expect_schedule_rescreen()
            .times(1)
            .returning(|_| Err(CoreError::InternalServerError));
        let service = fixtures.service_with_scheduler(scheduler);

        let result = service
            .update_medical_profile(identity_of(&user), update("soy"))
            .await;

        assert!(result.is_ok());
        assert!(fixtures.profiles.get(user.id).is_some());
    }

    #[tokio::test]
    async fn banned_users_cannot_touch_their_profile() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("mallory", UserRole::Banned));
        let service = fixtures.service();

        assert_eq!(
            service
                .update_medical_profile(identity_of(&user), update("soy"))
                .await
                .unwrap_err(),
            CoreError::Banned
        );
        assert_eq!(
            service.get_medical_profile(identity_of(&user)).await.unwrap_err(),
            CoreError::Banned
        );
        assert!(fixtures.profiles.get(user.id).is_none());
    }
}
