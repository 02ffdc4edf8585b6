use serde_json::json;

/// Prompt sent along with every analyzed image.
pub const INGREDIENTS_PROMPT: &str = "Analyze this image and list all ingredients you can identify or assume in JSON format. \
Use this exact structure: {\"ingredients\": [\"ingredient1\", \"ingredient2\", ...]} \
Be fast and concise.";

/// Returns the JSON schema for ingredient extraction responses
pub fn get_ingredients_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "ingredients": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["ingredients"]
    })
}
