use serde_json::{Map, Value};

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::entities::{AnalysisResult, Ingredient},
    screening::{screener::screen, token_set::TokenSet},
};

/// Stored when a payload being rescreened has no `original_response` key.
pub const RESCREEN_PLACEHOLDER: &str = "Re-checked against updated medical data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedAnalysis {
    pub result: AnalysisResult,
    pub warnings_count: i32,
}

impl UpdatedAnalysis {
    pub fn to_payload(&self) -> Result<String, CoreError> {
        serde_json::to_string(&self.result).map_err(|e| {
            tracing::error!("Failed to serialize analysis result: {}", e);
            CoreError::InternalServerError
        })
    }
}

/// Screens `names` in order and builds one warning line per raised flag.
pub fn screen_ingredients<I, S>(
    names: I,
    original_response: Option<String>,
    allergens: &TokenSet,
    contraindications: &TokenSet,
) -> UpdatedAnalysis
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut ingredients = Vec::new();
    let mut warnings = Vec::new();

    for name in names {
        let name: String = name.into();
        let flags = screen(&name, allergens, contraindications);

        if flags.is_allergen {
            warnings.push(format!("Allergen detected: {name}"));
        }
        if flags.is_contraindication {
            warnings.push(format!("Contraindication: {name}"));
        }

        ingredients.push(Ingredient {
            name,
            is_allergen: flags.is_allergen,
            is_contraindication: flags.is_contraindication,
        });
    }

    let result = AnalysisResult {
        ingredients,
        warnings,
        original_response,
    };
    let warnings_count = result.warnings_count();

    UpdatedAnalysis {
        result,
        warnings_count,
    }
}

/// Recomputes flags and warnings of a stored `analysis_result` payload.
///
/// Only ingredient names are read back; stored flags are discarded.
pub fn rescreen(
    payload: &str,
    allergens: &TokenSet,
    contraindications: &TokenSet,
) -> Result<UpdatedAnalysis, CoreError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| CoreError::MalformedRecord(format!("payload is not JSON: {e}")))?;

    let Value::Object(fields) = value else {
        return Err(malformed("payload is not an object"));
    };

    let names = ingredient_names(&fields)?;
    let original_response = match fields.get("original_response") {
        None => Some(RESCREEN_PLACEHOLDER.to_string()),
        Some(Value::Null) => None,
        Some(Value::String(response)) => Some(response.clone()),
        Some(_) => return Err(malformed("original_response is not a string")),
    };

    Ok(screen_ingredients(
        names,
        original_response,
        allergens,
        contraindications,
    ))
}

fn ingredient_names(fields: &Map<String, Value>) -> Result<Vec<String>, CoreError> {
    let items = match fields.get("ingredients") {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(malformed("ingredients is not a list")),
    };

    items
        .iter()
        .map(|item| match item {
            Value::Object(ingredient) => match ingredient.get("name") {
                None => Ok(String::new()),
                Some(Value::String(name)) => Ok(name.clone()),
                Some(_) => Err(malformed("ingredient name is not a string")),
            },
            _ => Err(malformed("ingredient entry is not an object")),
        })
        .collect()
}

fn malformed(reason: &str) -> CoreError {
    CoreError::MalformedRecord(reason.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tokens(text: &str) -> TokenSet {
        TokenSet::parse(Some(text))
    }

    fn stored(names: &[&str]) -> String {
        json!({
            "ingredients": names
                .iter()
                .map(|name| json!({"name": name, "is_allergen": true, "is_contraindication": true}))
                .collect::<Vec<_>>(),
            "warnings": ["stale"],
            "original_response": "model said so",
        })
        .to_string()
    }

    #[test]
    fn recomputes_flags_and_discards_stored_ones() {
        let updated = rescreen(
            &stored(&["Almond milk", "Water", "Peanut butter"]),
            &tokens("nuts, dairy"),
            &TokenSet::default(),
        )
        .unwrap();

        assert!(updated.result.ingredients.iter().all(|i| !i.is_allergen && !i.is_contraindication));
        assert!(updated.result.warnings.is_empty());
        assert_eq!(updated.warnings_count, 0);
        assert_eq!(updated.result.original_response.as_deref(), Some("model said so"));
    }

    #[test]
    fn builds_one_warning_per_flag_in_ingredient_order() {
        let updated = rescreen(
            &stored(&["Peanut butter", "Salt", "Salted peanut"]),
            &tokens("peanut"),
            &tokens("salt"),
        )
        .unwrap();

        assert_eq!(
            updated.result.warnings,
            vec![
                "Allergen detected: Peanut butter",
                "Contraindication: Salt",
                "Allergen detected: Salted peanut",
                "Contraindication: Salted peanut",
            ]
        );
        assert_eq!(updated.warnings_count, 4);
        assert_eq!(
            updated
                .result
                .ingredients
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Peanut butter", "Salt", "Salted peanut"]
        );
    }

    #[test]
    fn warnings_count_equals_raised_flags() {
        let updated = rescreen(
            &stored(&["egg", "eggplant", "milk", "water"]),
            &tokens("egg milk"),
            &tokens("plant"),
        )
        .unwrap();

        let flags = updated
            .result
            .ingredients
            .iter()
            .map(|i| i32::from(i.is_allergen) + i32::from(i.is_contraindication))
            .sum::<i32>();
        assert_eq!(updated.warnings_count, flags);
        assert_eq!(updated.result.warnings.len() as i32, flags);
    }

    #[test]
    fn rescreening_its_own_output_is_idempotent() {
        let allergens = tokens("peanut");
        let contraindications = tokens("sugar");

        let first = rescreen(&stored(&["Peanut butter", "Sugar"]), &allergens, &contraindications)
            .unwrap();
        let second = rescreen(&first.to_payload().unwrap(), &allergens, &contraindications).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.to_payload().unwrap(), second.to_payload().unwrap());
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let updated = rescreen(r#"{"ingredients": [{}]}"#, &tokens("x"), &TokenSet::default())
            .unwrap();

        assert_eq!(updated.result.ingredients[0].name, "");
        assert_eq!(
            updated.result.original_response.as_deref(),
            Some(RESCREEN_PLACEHOLDER)
        );

        let empty = rescreen("{}", &tokens("x"), &TokenSet::default()).unwrap();
        assert!(empty.result.ingredients.is_empty());
        assert_eq!(empty.warnings_count, 0);
    }

    #[test]
    fn explicit_null_response_is_carried_through() {
        let updated = rescreen(
            r#"{"ingredients": [], "original_response": null}"#,
            &tokens("x"),
            &TokenSet::default(),
        )
        .unwrap();

        assert_eq!(updated.result.original_response, None);
        let payload = updated.to_payload().unwrap();
        assert!(payload.contains(r#""original_response":null"#), "{payload}");
        assert!(!payload.contains(RESCREEN_PLACEHOLDER));
    }

    #[test]
    fn rejects_payloads_that_are_not_structured() {
        let cases = [
            "not json",
            "[1, 2]",
            r#"{"ingredients": "milk"}"#,
            r#"{"ingredients": ["milk"]}"#,
            r#"{"ingredients": [{"name": 42}]}"#,
            r#"{"ingredients": null}"#,
        ];

        for payload in cases {
            assert!(
                matches!(
                    rescreen(payload, &TokenSet::default(), &TokenSet::default()),
                    Err(CoreError::MalformedRecord(_))
                ),
                "{payload} should be malformed"
            );
        }
    }
}
