use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Content types accepted for uploaded food photos.
pub const ALLOWED_IMAGE_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/jpg",
    "image/gif",
    "image/bmp",
    "image/webp",
];

/// Upper bound for an analyzed image, 10 MiB.
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

pub const UNIDENTIFIED_INGREDIENTS: &str = "Could not identify ingredients";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub name: String,
    pub is_allergen: bool,
    pub is_contraindication: bool,
}

impl Ingredient {
    pub fn warnings_count(&self) -> i32 {
        i32::from(self.is_allergen) + i32::from(self.is_contraindication)
    }
}

/// Screened ingredient list as stored in `saved_analyses.analysis_result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub ingredients: Vec<Ingredient>,
    pub warnings: Vec<String>,
    /// Raw model output. `null` is kept as is when a stored payload carries it.
    pub original_response: Option<String>,
}

impl AnalysisResult {
    pub fn warnings_count(&self) -> i32 {
        self.ingredients.iter().map(Ingredient::warnings_count).sum()
    }
}
