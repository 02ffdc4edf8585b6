use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use nutriguard_core::domain::food_analysis::entities::SavedAnalysisDetails;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::api_entities::api_error::ApiError;

/// Uploaded image part of a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Bytes,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

/// Multipart body with one `image` file part and any number of text fields.
#[derive(Debug, Default)]
pub struct ImageForm {
    pub image: Option<UploadedImage>,
    pub fields: HashMap<String, String>,
}

impl ImageForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = ImageForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == "image" {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                form.image = Some(UploadedImage {
                    data,
                    filename,
                    content_type,
                });
            } else if !name.is_empty() {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read field {name}: {}", e))
                })?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn require_image(&mut self) -> Result<UploadedImage, ApiError> {
        self.image
            .take()
            .ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))
    }

    pub fn require_text(&mut self, name: &str) -> Result<String, ApiError> {
        self.fields
            .remove(name)
            .ok_or_else(|| ApiError::BadRequest(format!("Missing field {name}")))
    }

    pub fn require_count(&mut self, name: &str) -> Result<i32, ApiError> {
        let raw = self.require_text(name)?;
        raw.trim()
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("{name} must be an integer")))
    }
}

/// Saved analysis as returned to clients, with the stored payload inlined as JSON.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SavedAnalysisResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_url: Option<String>,
    #[schema(value_type = Object)]
    pub analysis_result: serde_json::Value,
    pub ingredients_count: i32,
    pub warnings_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<SavedAnalysisDetails> for SavedAnalysisResponse {
    fn from(details: SavedAnalysisDetails) -> Self {
        let analysis = details.analysis;
        let analysis_result = analysis
            .result_json()
            .unwrap_or_else(|| serde_json::Value::String(analysis.analysis_result.clone()));

        Self {
            id: analysis.id,
            user_id: analysis.user_id,
            image_url: details.image_url,
            analysis_result,
            ingredients_count: analysis.ingredients_count,
            warnings_count: analysis.warnings_count,
            created_at: analysis.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use nutriguard_core::domain::food_analysis::entities::SavedAnalysis;
    use serde_json::json;

    use super::*;

    #[test]
    fn stored_payload_is_inlined_as_json() {
        let analysis = SavedAnalysis::new(
            Uuid::new_v4(),
            "user_1/a.png".to_string(),
            json!({"ingredients": [], "warnings": [], "original_response": "raw"}).to_string(),
            0,
            0,
        );

        let response = SavedAnalysisResponse::from(SavedAnalysisDetails {
            analysis,
            image_url: Some("http://storage/a.png".to_string()),
        });

        assert_eq!(response.analysis_result["original_response"], "raw");
        assert_eq!(response.image_url.as_deref(), Some("http://storage/a.png"));
    }

    #[test]
    fn unparseable_payload_is_passed_through_as_text() {
        let analysis = SavedAnalysis::new(Uuid::new_v4(), "k".to_string(), "{oops".to_string(), 0, 0);

        let response = SavedAnalysisResponse::from(SavedAnalysisDetails {
            analysis,
            image_url: None,
        });

        assert_eq!(response.analysis_result, json!("{oops"));
    }

    #[test]
    fn counts_must_be_integers() {
        let mut form = ImageForm::default();
        form.fields.insert("warnings_count".to_string(), " 3 ".to_string());
        form.fields.insert("ingredients_count".to_string(), "three".to_string());

        assert_eq!(form.require_count("warnings_count").unwrap(), 3);
        assert!(matches!(
            form.require_count("ingredients_count"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(form.require_image(), Err(ApiError::BadRequest(_))));
    }
}
