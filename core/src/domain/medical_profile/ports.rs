use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    medical_profile::{entities::MedicalProfile, value_objects::UpdateMedicalProfileInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait MedicalProfileRepository: Send + Sync {
    fn fetch_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<MedicalProfile>, CoreError>> + Send;

    /// Inserts the profile or overwrites the one already owned by `profile.user_id`.
    fn upsert(
        &self,
        profile: MedicalProfile,
    ) -> impl Future<Output = Result<MedicalProfile, CoreError>> + Send;

    fn delete_by_user(&self, user_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait MedicalProfileService: Send + Sync {
    fn get_medical_profile(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<MedicalProfile, CoreError>> + Send;

    /// Stores the profile and schedules a rescreen of the caller's saved analyses.
    fn update_medical_profile(
        &self,
        identity: Identity,
        input: UpdateMedicalProfileInput,
    ) -> impl Future<Output = Result<MedicalProfile, CoreError>> + Send;
}

pub trait MedicalProfilePolicy: Send + Sync {
    fn can_manage_medical_profile(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}
