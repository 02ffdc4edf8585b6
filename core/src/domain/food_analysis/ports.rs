use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{AnalysisResult, SavedAnalysis, SavedAnalysisDetails},
        value_objects::{AnalyzeImageInput, SaveAnalysisInput},
    },
};

/// Repository trait for saved analyses
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisRepository: Send + Sync {
    fn create_analysis(
        &self,
        analysis: SavedAnalysis,
    ) -> impl Future<Output = Result<SavedAnalysis, CoreError>> + Send;

    /// Every analysis owned by `user_id`, newest first.
    fn fetch_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<SavedAnalysis>, CoreError>> + Send;

    fn fetch_by_id(
        &self,
        analysis_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<SavedAnalysis>, CoreError>> + Send;

    /// Overwrites the stored payload and warning count of one analysis.
    fn update_result(
        &self,
        analysis_id: Uuid,
        analysis_result: String,
        warnings_count: i32,
    ) -> impl Future<Output = Result<SavedAnalysis, CoreError>> + Send;

    fn delete_analysis(
        &self,
        analysis_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete_by_user(&self, user_id: Uuid) -> impl Future<Output = Result<u64, CoreError>> + Send;
}

/// LLM Client trait for calling vision models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for image analysis and saved analyses
#[cfg_attr(test, mockall::automock)]
pub trait FoodAnalysisService: Send + Sync {
    fn analyze_image(
        &self,
        identity: Identity,
        input: AnalyzeImageInput,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;

    fn save_analysis(
        &self,
        identity: Identity,
        input: SaveAnalysisInput,
    ) -> impl Future<Output = Result<SavedAnalysisDetails, CoreError>> + Send;

    fn list_analyses(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<Vec<SavedAnalysisDetails>, CoreError>> + Send;

    fn delete_analysis(
        &self,
        identity: Identity,
        analysis_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Policy trait for food analysis authorization
pub trait FoodAnalysisPolicy: Send + Sync {
    fn can_analyze_food(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn can_manage_analyses(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}
