use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::entities::{
        ALLOWED_IMAGE_TYPES, AnalysisResult, MAX_IMAGE_SIZE, UNIDENTIFIED_INGREDIENTS,
    },
};

static JSON_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{[^{}]*\{.*\}[^{}]*\}|\{.*\}").expect("valid JSON block pattern")
});

/// Checks the declared content type, the size and that the bytes decode as an image.
pub fn validate_image(image_data: &[u8], content_type: Option<&str>) -> Result<(), CoreError> {
    if !content_type.is_some_and(|ct| ALLOWED_IMAGE_TYPES.contains(&ct)) {
        return Err(CoreError::InvalidImage(format!(
            "unsupported file type, allowed: {}",
            ALLOWED_IMAGE_TYPES.join(", ")
        )));
    }

    if image_data.is_empty() {
        return Err(CoreError::InvalidImage("file is empty".to_string()));
    }

    if image_data.len() > MAX_IMAGE_SIZE {
        return Err(CoreError::FileTooLarge);
    }

    image::load_from_memory(image_data)
        .map_err(|e| CoreError::InvalidImage(format!("invalid image format: {e}")))?;

    Ok(())
}

/// Parses a client-submitted analysis and checks its counters against it.
pub fn parse_submitted_analysis(
    analysis_result: &str,
    ingredients_count: i32,
    warnings_count: i32,
) -> Result<AnalysisResult, CoreError> {
    let result: AnalysisResult = serde_json::from_str(analysis_result)
        .map_err(|e| CoreError::Invalid(format!("analysis_result is not a valid analysis: {e}")))?;

    if usize::try_from(ingredients_count).ok() != Some(result.ingredients.len()) {
        return Err(CoreError::Invalid(format!(
            "ingredients_count {ingredients_count} does not match {} ingredients",
            result.ingredients.len()
        )));
    }

    if warnings_count != result.warnings_count() {
        return Err(CoreError::Invalid(format!(
            "warnings_count {warnings_count} does not match {} raised flags",
            result.warnings_count()
        )));
    }

    Ok(result)
}

/// Object key of an uploaded image: `user_{id}/{id}_{random}.{ext}`.
pub fn image_object_key(user_id: Uuid, filename: Option<&str>) -> String {
    let extension = filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .unwrap_or("jpg");

    format!(
        "user_{user_id}/{user_id}_{}.{extension}",
        Uuid::new_v4().simple()
    )
}

/// Pulls ingredient names out of a free-form model response.
///
/// Never returns an empty list.
pub fn extract_ingredients(content: &str) -> Vec<String> {
    let mut candidates = candidate_ingredients(content);
    if candidates.is_empty() {
        candidates.push(content.trim().to_string());
    }

    let cleaned: Vec<String> = candidates
        .iter()
        .map(|candidate| clean_ingredient(candidate))
        .filter(|name| name.chars().count() > 1)
        .map(String::from)
        .collect();

    if cleaned.is_empty() {
        return vec![UNIDENTIFIED_INGREDIENTS.to_string()];
    }

    cleaned
}

fn candidate_ingredients(content: &str) -> Vec<String> {
    let Some(block) = find_json_block(content) else {
        return content
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() > 3)
            .map(String::from)
            .collect();
    };

    let block = block.replace("```json", "").replace("```", "");

    match serde_json::from_str::<Value>(block.trim()) {
        Ok(value) => match value.get("ingredients") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
            Some(Value::String(single)) => vec![single.clone()],
            Some(other) => vec![other.to_string()],
        },
        Err(e) => {
            warn!("Model response contains unparsable JSON: {}", e);
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('{') && !line.starts_with('}'))
                .map(String::from)
                .collect()
        }
    }
}

fn find_json_block(content: &str) -> Option<&str> {
    JSON_BLOCK.find(content).map(|m| m.as_str())
}

fn clean_ingredient(raw: &str) -> &str {
    raw.trim_matches(|c: char| {
        matches!(c, '-' | '*' | '•' | '.' | '"' | '\'') || c.is_ascii_digit() || c.is_whitespace()
    })
}
