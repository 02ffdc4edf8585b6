use std::time::Duration;

use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::{
    authentication::{ports::TokenRepository, value_objects::Identity},
    common::{entities::app_errors::CoreError, policies::ensure_policy, services::Service},
    crypto::ports::HasherRepository,
    food_analysis::{
        entities::{AnalysisResult, SavedAnalysis, SavedAnalysisDetails},
        helpers::{
            extract_ingredients, image_object_key, parse_submitted_analysis, validate_image,
        },
        ports::{AnalysisRepository, FoodAnalysisPolicy, FoodAnalysisService, LLMClient},
        schema::{INGREDIENTS_PROMPT, get_ingredients_schema},
        value_objects::{AnalyzeImageInput, SaveAnalysisInput},
    },
    health::ports::HealthCheckRepository,
    medical_profile::ports::MedicalProfileRepository,
    screening::{ports::RescreenScheduler, rescreener::screen_ingredients},
    storage::ports::ObjectStoragePort,
    user::ports::UserRepository,
};

/// Lifetime of the image links handed out with saved analyses.
pub const IMAGE_URL_TTL: Duration = Duration::from_secs(60 * 60);

impl<U, T, H, MP, A, LLM, OS, RS, HC> Service<U, T, H, MP, A, LLM, OS, RS, HC>
where
    OS: ObjectStoragePort,
{
    /// Attaches a presigned link to the image. A failed presign leaves the link out.
    pub(crate) async fn with_image_url(&self, analysis: SavedAnalysis) -> SavedAnalysisDetails {
        let image_url = match self
            .object_storage
            .presign_get_url(&analysis.image_path, IMAGE_URL_TTL)
            .await
        {
            Ok(presigned) => Some(presigned.url),
            Err(e) => {
                warn!(analysis_id = %analysis.id, "Failed to presign image url: {}", e);
                None
            }
        };

        SavedAnalysisDetails {
            analysis,
            image_url,
        }
    }
}

impl<U, T, H, MP, A, LLM, OS, RS, HC> FoodAnalysisService
    for Service<U, T, H, MP, A, LLM, OS, RS, HC>
where
    U: UserRepository,
    T: TokenRepository,
    H: HasherRepository,
    MP: MedicalProfileRepository,
    A: AnalysisRepository,
    LLM: LLMClient,
    OS: ObjectStoragePort,
    RS: RescreenScheduler,
    HC: HealthCheckRepository,
{
    async fn analyze_image(
        &self,
        identity: Identity,
        input: AnalyzeImageInput,
    ) -> Result<AnalysisResult, CoreError> {
        // 1. Check permissions
        ensure_policy(
            self.policy.can_analyze_food(identity.clone()).await,
            "insufficient permissions to analyze food",
        )?;

        // 2. Validate the upload
        validate_image(&input.image_data, input.content_type.as_deref())?;

        // 3. Current profile tokens, empty when the user has no profile
        let (allergens, contraindications) = self
            .medical_profile_repository
            .fetch_by_user(identity.id())
            .await?
            .map(|p| (p.allergen_tokens(), p.contraindication_tokens()))
            .unwrap_or_default();

        // 4. Call the vision model
        let content = tokio::time::timeout(
            self.llm_timeout,
            self.llm_client.generate_with_image(
                INGREDIENTS_PROMPT.to_string(),
                input.image_data.to_vec(),
                get_ingredients_schema(),
            ),
        )
        .await
        .map_err(|_| {
            error!(
                timeout_seconds = self.llm_timeout.as_secs(),
                "Vision model did not answer in time"
            );
            CoreError::ExternalServiceTimeout
        })??;

        // 5. Extract and screen ingredients
        let names = extract_ingredients(&content);
        let screened = screen_ingredients(names, Some(content), &allergens, &contraindications);

        Ok(screened.result)
    }

    async fn save_analysis(
        &self,
        identity: Identity,
        input: SaveAnalysisInput,
    ) -> Result<SavedAnalysisDetails, CoreError> {
        ensure_policy(
            self.policy.can_manage_analyses(identity.clone()).await,
            "insufficient permissions",
        )?;

        parse_submitted_analysis(
            &input.analysis_result,
            input.ingredients_count,
            input.warnings_count,
        )?;

        if input.image_data.is_empty() {
            return Err(CoreError::InvalidImage("file is empty".to_string()));
        }

        let object_key = image_object_key(identity.id(), input.filename.as_deref());
        let content_type = input
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");

        self.object_storage
            .put_object(&object_key, input.image_data, content_type)
            .await?;

        let analysis = SavedAnalysis::new(
            identity.id(),
            object_key.clone(),
            input.analysis_result,
            input.ingredients_count,
            input.warnings_count,
        );

        let analysis = match self.analysis_repository.create_analysis(analysis).await {
            Ok(analysis) => analysis,
            Err(e) => {
                if let Err(cleanup) = self.object_storage.delete_object(&object_key).await {
                    warn!(object_key = %object_key, "Failed to remove orphaned image: {}", cleanup);
                }
                return Err(e);
            }
        };

        Ok(self.with_image_url(analysis).await)
    }

    async fn list_analyses(&self, identity: Identity) -> Result<Vec<SavedAnalysisDetails>, CoreError> {
        ensure_policy(
            self.policy.can_manage_analyses(identity.clone()).await,
            "insufficient permissions",
        )?;

        let analyses = self.analysis_repository.fetch_by_user(identity.id()).await?;

        let mut details = Vec::with_capacity(analyses.len());
        for analysis in analyses {
            details.push(self.with_image_url(analysis).await);
        }

        Ok(details)
    }

    async fn delete_analysis(&self, identity: Identity, analysis_id: Uuid) -> Result<(), CoreError> {
        ensure_policy(
            self.policy.can_manage_analyses(identity.clone()).await,
            "insufficient permissions",
        )?;

        let analysis = self
            .analysis_repository
            .fetch_by_id(analysis_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;

        self.analysis_repository
            .delete_analysis(analysis.id, identity.id())
            .await?;

        if let Err(e) = self.object_storage.delete_object(&analysis.image_path).await {
            warn!(analysis_id = %analysis.id, "Failed to delete analysis image: {}", e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::Bytes;

    use super::*;
    use crate::{
        domain::{
            food_analysis::entities::UNIDENTIFIED_INGREDIENTS, user::entities::UserRole,
        },
        testing::{Fixtures, identity_of, user_with_role},
    };

    fn png_bytes() -> Bytes {
        let mut buffer = Cursor::new(Vec::new());
        image::RgbImage::new(4, 4)
            .write_to(&mut buffer, image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buffer.into_inner())
    }

    fn analyze_input() -> AnalyzeImageInput {
        AnalyzeImageInput {
            image_data: png_bytes(),
            content_type: Some("image/png".to_string()),
        }
    }

    const SUBMITTED: &str = r#"{
        "ingredients": [
            {"name": "Peanut", "is_allergen": true, "is_contraindication": false},
            {"name": "Water", "is_allergen": false, "is_contraindication": false}
        ],
        "warnings": ["Allergen detected: Peanut"],
        "original_response": "x"
    }"#;

    fn save_input(analysis_result: &str) -> SaveAnalysisInput {
        SaveAnalysisInput {
            image_data: png_bytes(),
            filename: Some("dinner.png".to_string()),
            content_type: Some("image/png".to_string()),
            analysis_result: analysis_result.to_string(),
            ingredients_count: 2,
            warnings_count: 1,
        }
    }

    #[tokio::test]
    async fn analyze_image_screens_against_current_profile() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));
        fixtures.profiles.set(user.id, Some("peanut"), Some("sugar"));
        let response = r#"{"ingredients": ["Peanut butter", "Water", "Brown sugar"]}"#;
        fixtures.llm.respond_with(Ok(response.to_string()));

        let result = fixtures
            .service()
            .analyze_image(identity_of(&user), analyze_input())
            .await
            .unwrap();

        assert_eq!(result.original_response.as_deref(), Some(response));
        assert_eq!(
            result.warnings,
            vec![
                "Allergen detected: Peanut butter",
                "Contraindication: Brown sugar"
            ]
        );
        assert!(result.ingredients[0].is_allergen);
        assert!(!result.ingredients[1].is_allergen);
        assert!(result.ingredients[2].is_contraindication);
        assert_eq!(fixtures.analyses.len(), 0);
    }

    #[tokio::test]
    async fn analyze_image_without_profile_flags_nothing() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));
        fixtures.llm.respond_with(Ok("I cannot tell.".to_string()));

        let result = fixtures
            .service()
            .analyze_image(identity_of(&user), analyze_input())
            .await
            .unwrap();

        assert_eq!(result.ingredients.len(), 1);
        assert_eq!(result.ingredients[0].name, "I cannot tell");
        assert!(result.warnings.is_empty());
    }

    #[tokio::test]
    async fn analyze_image_falls_back_when_nothing_is_recognized() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));
        fixtures.llm.respond_with(Ok(r#"{"ingredients": ["a"]}"#.to_string()));

        let result = fixtures
            .service()
            .analyze_image(identity_of(&user), analyze_input())
            .await
            .unwrap();

        assert_eq!(result.ingredients[0].name, UNIDENTIFIED_INGREDIENTS);
    }

    #[tokio::test]
    async fn analyze_image_rejects_bad_uploads_before_calling_the_model() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));
        let service = fixtures.service();

        let wrong_type = AnalyzeImageInput {
            image_data: png_bytes(),
            content_type: Some("text/plain".to_string()),
        };
        let not_an_image = AnalyzeImageInput {
            image_data: Bytes::from_static(b"plain text"),
            content_type: Some("image/png".to_string()),
        };

        for input in [wrong_type, not_an_image] {
            let result = service.analyze_image(identity_of(&user), input).await;
            assert!(matches!(result, Err(CoreError::InvalidImage(_))));
        }
        assert_eq!(fixtures.llm.calls(), 0);
    }

    #[tokio::test]
    async fn analyze_image_times_out() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));
        fixtures.llm.delay_by(Duration::from_secs(2));
        let mut service = fixtures.service();
        service.llm_timeout = Duration::from_millis(20);

        let result = service.analyze_image(identity_of(&user), analyze_input()).await;

        assert_eq!(result.unwrap_err(), CoreError::ExternalServiceTimeout);
    }

    #[tokio::test]
    async fn analyze_image_propagates_model_errors() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));
        fixtures.llm.respond_with(Err(CoreError::ExternalServiceError(
            "model unavailable".to_string(),
        )));

        let result = fixtures
            .service()
            .analyze_image(identity_of(&user), analyze_input())
            .await;

        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn save_analysis_stores_image_and_record() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));

        let details = fixtures
            .service()
            .save_analysis(
                identity_of(&user),
                save_input(SUBMITTED),
            )
            .await
            .unwrap();

        let key = &details.analysis.image_path;
        assert!(key.starts_with(&format!("user_{}/{}_", user.id, user.id)));
        assert!(key.ends_with(".png"));
        assert!(fixtures.storage.contains(key));
        assert_eq!(fixtures.storage.content_type(key).as_deref(), Some("image/png"));
        assert_eq!(details.analysis.ingredients_count, 2);
        assert_eq!(details.analysis.warnings_count, 1);
        assert_eq!(
            details.image_url,
            Some(format!("http://storage.test/ingredients/{key}"))
        );
        assert_eq!(fixtures.analyses.get(details.analysis.id).unwrap(), details.analysis);
    }

    #[tokio::test]
    async fn save_analysis_rejects_invalid_json_and_empty_images() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));
        let service = fixtures.service();

        let invalid_json = service
            .save_analysis(identity_of(&user), save_input("{oops"))
            .await;
        assert!(matches!(invalid_json, Err(CoreError::Invalid(_))));

        let mut empty = save_input(SUBMITTED);
        empty.image_data = Bytes::new();
        let empty_image = service.save_analysis(identity_of(&user), empty).await;
        assert!(matches!(empty_image, Err(CoreError::InvalidImage(_))));

        assert_eq!(fixtures.storage.len(), 0);
        assert_eq!(fixtures.analyses.len(), 0);
    }

    #[tokio::test]
    async fn save_analysis_rejects_counts_that_disagree_with_the_payload() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));
        let service = fixtures.service();

        let mut inflated = save_input(r#"{"ingredients": [], "warnings": [], "original_response": "x"}"#);
        inflated.ingredients_count = 0;
        inflated.warnings_count = 5;

        let mut negative = save_input(SUBMITTED);
        negative.warnings_count = -1;

        let mut wrong_length = save_input(SUBMITTED);
        wrong_length.ingredients_count = 3;

        let not_an_analysis = save_input(r#"[{"name": "Peanut"}]"#);

        for input in [inflated, negative, wrong_length, not_an_analysis] {
            let result = service.save_analysis(identity_of(&user), input).await;
            assert!(matches!(result, Err(CoreError::Invalid(_))), "{result:?}");
        }
        assert_eq!(fixtures.storage.len(), 0);
        assert_eq!(fixtures.analyses.len(), 0);
    }

    #[tokio::test]
    async fn list_analyses_is_newest_first_and_tolerates_presign_failures() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));
        let mut older = SavedAnalysis::new(user.id, "a.png".to_string(), "{}".to_string(), 0, 0);
        older.created_at -= chrono::Duration::hours(1);
        let older = fixtures.analyses.insert(older);
        let newer = fixtures
            .analyses
            .insert(SavedAnalysis::new(user.id, "b.png".to_string(), "{}".to_string(), 0, 0));
        fixtures.storage.fail_presigning();

        let listed = fixtures
            .service()
            .list_analyses(identity_of(&user))
            .await
            .unwrap();

        assert_eq!(
            listed.iter().map(|d| d.analysis.id).collect::<Vec<_>>(),
            vec![newer.id, older.id]
        );
        assert!(listed.iter().all(|d| d.image_url.is_none()));
    }

    #[tokio::test]
    async fn delete_analysis_removes_record_then_image() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("alice", UserRole::User));
        let analysis = fixtures.analyses.insert(SavedAnalysis::new(
            user.id,
            "user/img.png".to_string(),
            "{}".to_string(),
            0,
            0,
        ));
        fixtures.storage.insert("user/img.png", b"png");

        fixtures
            .service()
            .delete_analysis(identity_of(&user), analysis.id)
            .await
            .unwrap();

        assert!(fixtures.analyses.get(analysis.id).is_none());
        assert!(!fixtures.storage.contains("user/img.png"));
    }

    #[tokio::test]
    async fn delete_analysis_ignores_storage_failures_but_not_foreign_ids() {
        let fixtures = Fixtures::default();
        let owner = fixtures.users.insert(user_with_role("owner", UserRole::User));
        let other = fixtures.users.insert(user_with_role("other", UserRole::User));
        let analysis = fixtures.analyses.insert(SavedAnalysis::new(
            owner.id,
            "owner/img.png".to_string(),
            "{}".to_string(),
            0,
            0,
        ));
        fixtures.storage.fail_deletes();
        let service = fixtures.service();

        let foreign = service.delete_analysis(identity_of(&other), analysis.id).await;
        assert_eq!(foreign.unwrap_err(), CoreError::NotFound);

        service
            .delete_analysis(identity_of(&owner), analysis.id)
            .await
            .unwrap();
        assert!(fixtures.analyses.get(analysis.id).is_none());
    }

    #[tokio::test]
    async fn banned_users_cannot_use_analyses() {
        let fixtures = Fixtures::default();
        let user = fixtures.users.insert(user_with_role("mallory", UserRole::Banned));
        let service = fixtures.service();

        assert_eq!(
            service.list_analyses(identity_of(&user)).await.unwrap_err(),
            CoreError::Banned
        );
        assert_eq!(
            service
                .analyze_image(identity_of(&user), analyze_input())
                .await
                .unwrap_err(),
            CoreError::Banned
        );
    }
}
