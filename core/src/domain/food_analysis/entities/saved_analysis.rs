use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAnalysis {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_path: String,
    /// Serialized `AnalysisResult`. Kept as text so that a corrupted payload
    /// can still be loaded and reported.
    pub analysis_result: String,
    pub ingredients_count: i32,
    pub warnings_count: i32,
    pub created_at: DateTime<Utc>,
}

impl SavedAnalysis {
    pub fn new(
        user_id: Uuid,
        image_path: String,
        analysis_result: String,
        ingredients_count: i32,
        warnings_count: i32,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            image_path,
            analysis_result,
            ingredients_count,
            warnings_count,
            created_at: now,
        }
    }

    /// The stored payload as JSON, if it still parses.
    pub fn result_json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.analysis_result).ok()
    }
}

/// A saved analysis together with a temporary link to its image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedAnalysisDetails {
    pub analysis: SavedAnalysis,
    pub image_url: Option<String>,
}
