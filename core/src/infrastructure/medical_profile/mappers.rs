use chrono::{TimeZone, Utc};

use crate::domain::medical_profile::entities::MedicalProfile;
use crate::entity::medical_profiles::Model as MedicalProfileModel;

impl From<MedicalProfileModel> for MedicalProfile {
    fn from(model: MedicalProfileModel) -> Self {
        MedicalProfile {
            id: model.id,
            user_id: model.user_id,
            contraindications: model.contraindications,
            allergens: model.allergens,
            updated_at: Utc.from_utc_datetime(&model.updated_at),
        }
    }
}
