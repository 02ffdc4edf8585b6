use crate::domain::{
    authentication::value_objects::Identity,
    common::{
        entities::app_errors::CoreError,
        policies::{NutriguardPolicy, Policy},
    },
    medical_profile::ports::MedicalProfilePolicy,
};

impl MedicalProfilePolicy for NutriguardPolicy {
    async fn can_manage_medical_profile(&self, identity: Identity) -> Result<bool, CoreError> {
        self.get_active_user(&identity)?;

        Ok(true)
    }
}
