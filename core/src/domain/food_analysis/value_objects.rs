use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct AnalyzeImageInput {
    pub image_data: Bytes,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SaveAnalysisInput {
    pub image_data: Bytes,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    /// JSON text of the analysis as shown to the user.
    pub analysis_result: String,
    pub ingredients_count: i32,
    pub warnings_count: i32,
}
