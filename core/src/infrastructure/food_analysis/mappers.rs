use chrono::{TimeZone, Utc};

use crate::domain::food_analysis::entities::SavedAnalysis;
use crate::entity::saved_analyses::Model as SavedAnalysisModel;

impl From<SavedAnalysisModel> for SavedAnalysis {
    fn from(model: SavedAnalysisModel) -> Self {
        SavedAnalysis {
            id: model.id,
            user_id: model.user_id,
            image_path: model.image_path,
            analysis_result: model.analysis_result,
            ingredients_count: model.ingredients_count,
            warnings_count: model.warnings_count,
            created_at: Utc.from_utc_datetime(&model.created_at),
        }
    }
}
