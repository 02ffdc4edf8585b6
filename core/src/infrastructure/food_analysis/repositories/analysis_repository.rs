use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{entities::SavedAnalysis, ports::AnalysisRepository},
};
use crate::entity::saved_analyses::{
    ActiveModel as SavedAnalysisActiveModel, Column as SavedAnalysisColumn,
    Entity as SavedAnalysisEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresAnalysisRepository {
    pub db: DatabaseConnection,
}

impl PostgresAnalysisRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AnalysisRepository for PostgresAnalysisRepository {
    async fn create_analysis(&self, analysis: SavedAnalysis) -> Result<SavedAnalysis, CoreError> {
        let created = SavedAnalysisEntity::insert(SavedAnalysisActiveModel {
            id: Set(analysis.id),
            user_id: Set(analysis.user_id),
            image_path: Set(analysis.image_path),
            analysis_result: Set(analysis.analysis_result),
            ingredients_count: Set(analysis.ingredients_count),
            warnings_count: Set(analysis.warnings_count),
            created_at: Set(analysis.created_at.naive_utc()),
        })
        .exec_with_returning(&self.db)
        .await
        .map(SavedAnalysis::from)
        .map_err(|e| {
            error!("Failed to create saved analysis: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(created)
    }

    async fn fetch_by_user(&self, user_id: Uuid) -> Result<Vec<SavedAnalysis>, CoreError> {
        let analyses = SavedAnalysisEntity::find()
            .filter(SavedAnalysisColumn::UserId.eq(user_id))
            .order_by_desc(SavedAnalysisColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch saved analyses: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(SavedAnalysis::from)
            .collect();

        Ok(analyses)
    }

    async fn fetch_by_id(
        &self,
        analysis_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SavedAnalysis>, CoreError> {
        let analysis = SavedAnalysisEntity::find()
            .filter(SavedAnalysisColumn::Id.eq(analysis_id))
            .filter(SavedAnalysisColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get saved analysis by id: {}", e);
                CoreError::InternalServerError
            })?
            .map(SavedAnalysis::from);

        Ok(analysis)
    }

    async fn update_result(
        &self,
        analysis_id: Uuid,
        analysis_result: String,
        warnings_count: i32,
    ) -> Result<SavedAnalysis, CoreError> {
        let updated = SavedAnalysisEntity::update(SavedAnalysisActiveModel {
            id: Set(analysis_id),
            user_id: NotSet,
            image_path: NotSet,
            analysis_result: Set(analysis_result),
            ingredients_count: NotSet,
            warnings_count: Set(warnings_count),
            created_at: NotSet,
        })
        .filter(SavedAnalysisColumn::Id.eq(analysis_id))
        .exec(&self.db)
        .await
        .map(SavedAnalysis::from)
        .map_err(|e| {
            error!(analysis_id = %analysis_id, "Failed to update analysis result: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(updated)
    }

    async fn delete_analysis(&self, analysis_id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        SavedAnalysisEntity::delete_many()
            .filter(SavedAnalysisColumn::Id.eq(analysis_id))
            .filter(SavedAnalysisColumn::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete saved analysis: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<u64, CoreError> {
        let result = SavedAnalysisEntity::delete_many()
            .filter(SavedAnalysisColumn::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete saved analyses: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(result.rows_affected)
    }
}
