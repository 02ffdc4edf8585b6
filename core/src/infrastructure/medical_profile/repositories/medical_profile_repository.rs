use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    medical_profile::{entities::MedicalProfile, ports::MedicalProfileRepository},
};
use crate::entity::medical_profiles::{
    ActiveModel as MedicalProfileActiveModel, Column as MedicalProfileColumn,
    Entity as MedicalProfileEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresMedicalProfileRepository {
    pub db: DatabaseConnection,
}

impl PostgresMedicalProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl MedicalProfileRepository for PostgresMedicalProfileRepository {
    async fn fetch_by_user(&self, user_id: Uuid) -> Result<Option<MedicalProfile>, CoreError> {
        let profile = MedicalProfileEntity::find()
            .filter(MedicalProfileColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch medical profile: {}", e);
                CoreError::InternalServerError
            })?
            .map(MedicalProfile::from);

        Ok(profile)
    }

    async fn upsert(&self, profile: MedicalProfile) -> Result<MedicalProfile, CoreError> {
        // Conflicts on user_id keep the existing id and overwrite the rest.
        let profile = MedicalProfileEntity::insert(MedicalProfileActiveModel {
            id: Set(profile.id),
            user_id: Set(profile.user_id),
            contraindications: Set(profile.contraindications),
            allergens: Set(profile.allergens),
            updated_at: Set(profile.updated_at.naive_utc()),
        })
        .on_conflict(
            OnConflict::column(MedicalProfileColumn::UserId)
                .update_columns([
                    MedicalProfileColumn::Contraindications,
                    MedicalProfileColumn::Allergens,
                    MedicalProfileColumn::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(&self.db)
        .await
        .map(MedicalProfile::from)
        .map_err(|e| {
            error!("Failed to upsert medical profile: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(profile)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<(), CoreError> {
        MedicalProfileEntity::delete_many()
            .filter(MedicalProfileColumn::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete medical profile: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
