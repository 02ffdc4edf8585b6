//! In-memory port implementations shared by the service and engine tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    authentication::{
        entities::{TokenType, UserToken},
        ports::TokenRepository,
        value_objects::Identity,
    },
    common::{TokenConfig, entities::app_errors::CoreError, services::Service},
    crypto::ports::HasherRepository,
    food_analysis::{
        entities::SavedAnalysis,
        ports::{AnalysisRepository, LLMClient},
    },
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
    medical_profile::{entities::MedicalProfile, ports::MedicalProfileRepository},
    screening::ports::MockRescreenScheduler,
    storage::{entities::PresignedUrl, ports::ObjectStoragePort},
    user::{
        entities::{User, UserRole},
        ports::UserRepository,
    },
};

pub fn user_with_role(username: &str, role: UserRole) -> User {
    let mut user = User::new(
        username.to_string(),
        format!("{username}@example.com"),
        format!("hashed:{username}-password"),
    );
    user.role = role;
    user
}

pub fn identity_of(user: &User) -> Identity {
    Identity::new(user.clone())
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn insert(&self, user: User) -> User {
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn get(&self, user_id: Uuid) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: User) -> Result<User, CoreError> {
        Ok(self.insert(user))
    }

    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, CoreError> {
        Ok(self.get(user_id))
    }

    async fn get_by_username(&self, username: String) -> Result<Option<User>, CoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn get_by_email(&self, email: String) -> Result<Option<User>, CoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update_user(&self, user: User) -> Result<User, CoreError> {
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(CoreError::NotFound)?;
        *stored = user.clone();
        Ok(user)
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), CoreError> {
        self.users.lock().unwrap().retain(|u| u.id != user_id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTokenRepository {
    tokens: Arc<Mutex<Vec<UserToken>>>,
}

impl InMemoryTokenRepository {
    pub fn insert(&self, token: UserToken) {
        self.tokens.lock().unwrap().push(token);
    }

    pub fn for_user(&self, user_id: Uuid) -> Vec<UserToken> {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

impl TokenRepository for InMemoryTokenRepository {
    async fn create_tokens(&self, tokens: Vec<UserToken>) -> Result<(), CoreError> {
        self.tokens.lock().unwrap().extend(tokens);
        Ok(())
    }

    async fn get_valid_token(
        &self,
        token_hash: String,
        token_type: TokenType,
    ) -> Result<Option<UserToken>, CoreError> {
        let now = Utc::now();
        let tokens = self.tokens.lock().unwrap();
        Ok(tokens
            .iter()
            .find(|t| t.token_hash == token_hash && t.token_type == token_type && !t.is_expired(now))
            .cloned())
    }

    async fn delete_by_hash(&self, token_hash: String) -> Result<(), CoreError> {
        self.tokens
            .lock()
            .unwrap()
            .retain(|t| t.token_hash != token_hash);
        Ok(())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<u64, CoreError> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.user_id != user_id);
        Ok((before - tokens.len()) as u64)
    }

    async fn delete_expired(&self) -> Result<u64, CoreError> {
        let now = Utc::now();
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| !t.is_expired(now));
        Ok((before - tokens.len()) as u64)
    }
}

/// Reversible "hash" so tests can seed users with known passwords.
#[derive(Clone, Default)]
pub struct PlainHasher;

impl HasherRepository for PlainHasher {
    async fn hash_password(&self, password: String) -> Result<String, CoreError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify_password(
        &self,
        password: String,
        password_hash: String,
    ) -> Result<bool, CoreError> {
        Ok(password_hash == format!("hashed:{password}"))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryMedicalProfileRepository {
    profiles: Arc<Mutex<HashMap<Uuid, MedicalProfile>>>,
}

impl InMemoryMedicalProfileRepository {
    pub fn set(&self, user_id: Uuid, allergens: Option<&str>, contraindications: Option<&str>) {
        let profile = MedicalProfile::new(
            user_id,
            contraindications.map(String::from),
            allergens.map(String::from),
        );
        self.profiles.lock().unwrap().insert(user_id, profile);
    }

    pub fn get(&self, user_id: Uuid) -> Option<MedicalProfile> {
        self.profiles.lock().unwrap().get(&user_id).cloned()
    }
}

impl MedicalProfileRepository for InMemoryMedicalProfileRepository {
    async fn fetch_by_user(&self, user_id: Uuid) -> Result<Option<MedicalProfile>, CoreError> {
        Ok(self.get(user_id))
    }

    async fn upsert(&self, profile: MedicalProfile) -> Result<MedicalProfile, CoreError> {
        let mut profiles = self.profiles.lock().unwrap();
        let stored = match profiles.get(&profile.user_id) {
            Some(existing) => MedicalProfile {
                id: existing.id,
                ..profile
            },
            None => profile,
        };
        profiles.insert(stored.user_id, stored.clone());
        Ok(stored)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<(), CoreError> {
        self.profiles.lock().unwrap().remove(&user_id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAnalysisRepository {
    analyses: Arc<Mutex<Vec<SavedAnalysis>>>,
    failing_updates: Arc<Mutex<HashSet<Uuid>>>,
    updates: Arc<AtomicUsize>,
}

impl InMemoryAnalysisRepository {
    pub fn insert(&self, analysis: SavedAnalysis) -> SavedAnalysis {
        self.analyses.lock().unwrap().push(analysis.clone());
        analysis
    }

    pub fn get(&self, analysis_id: Uuid) -> Option<SavedAnalysis> {
        self.analyses
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == analysis_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.analyses.lock().unwrap().len()
    }

    /// Makes every `update_result` call for `analysis_id` fail.
    pub fn fail_updates_for(&self, analysis_id: Uuid) {
        self.failing_updates.lock().unwrap().insert(analysis_id);
    }

    /// Number of successful `update_result` calls.
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn create_analysis(&self, analysis: SavedAnalysis) -> Result<SavedAnalysis, CoreError> {
        Ok(self.insert(analysis))
    }

    async fn fetch_by_user(&self, user_id: Uuid) -> Result<Vec<SavedAnalysis>, CoreError> {
        let mut analyses: Vec<SavedAnalysis> = self
            .analyses
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        analyses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(analyses)
    }

    async fn fetch_by_id(
        &self,
        analysis_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SavedAnalysis>, CoreError> {
        Ok(self.get(analysis_id).filter(|a| a.user_id == user_id))
    }

    async fn update_result(
        &self,
        analysis_id: Uuid,
        analysis_result: String,
        warnings_count: i32,
    ) -> Result<SavedAnalysis, CoreError> {
        if self.failing_updates.lock().unwrap().contains(&analysis_id) {
            return Err(CoreError::InternalServerError);
        }

        let mut analyses = self.analyses.lock().unwrap();
        let stored = analyses
            .iter_mut()
            .find(|a| a.id == analysis_id)
            .ok_or(CoreError::NotFound)?;
        stored.analysis_result = analysis_result;
        stored.warnings_count = warnings_count;
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(stored.clone())
    }

    async fn delete_analysis(&self, analysis_id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        self.analyses
            .lock()
            .unwrap()
            .retain(|a| !(a.id == analysis_id && a.user_id == user_id));
        Ok(())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<u64, CoreError> {
        let mut analyses = self.analyses.lock().unwrap();
        let before = analyses.len();
        analyses.retain(|a| a.user_id != user_id);
        Ok((before - analyses.len()) as u64)
    }
}

#[derive(Clone)]
pub struct StubLLMClient {
    response: Arc<Mutex<Result<String, CoreError>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    calls: Arc<AtomicUsize>,
}

impl Default for StubLLMClient {
    fn default() -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(r#"{"ingredients": []}"#.to_string()))),
            delay: Arc::new(Mutex::new(None)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl StubLLMClient {
    pub fn respond_with(&self, response: Result<String, CoreError>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn delay_by(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LLMClient for StubLLMClient {
    async fn generate_with_image(
        &self,
        _prompt: String,
        _image_data: Vec<u8>,
        _response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        let response = self.response.lock().unwrap().clone();

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        response
    }
}

#[derive(Clone, Default)]
pub struct InMemoryObjectStorage {
    objects: Arc<Mutex<HashMap<String, (Bytes, String)>>>,
    fail_presign: Arc<AtomicBool>,
    fail_delete: Arc<AtomicBool>,
}

impl InMemoryObjectStorage {
    pub fn insert(&self, object_key: &str, payload: &[u8]) {
        self.objects.lock().unwrap().insert(
            object_key.to_string(),
            (Bytes::copy_from_slice(payload), "image/png".to_string()),
        );
    }

    pub fn contains(&self, object_key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(object_key)
    }

    pub fn content_type(&self, object_key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(object_key)
            .map(|(_, content_type)| content_type.clone())
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn fail_presigning(&self) {
        self.fail_presign.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }
}

impl ObjectStoragePort for InMemoryObjectStorage {
    async fn ensure_bucket(&self) -> Result<(), CoreError> {
        Ok(())
    }

    async fn put_object(
        &self,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<(), CoreError> {
        self.objects
            .lock()
            .unwrap()
            .insert(object_key.to_string(), (payload, content_type.to_string()));
        Ok(())
    }

    async fn presign_get_url(
        &self,
        object_key: &str,
        expires_in: Duration,
    ) -> Result<PresignedUrl, CoreError> {
        if self.fail_presign.load(Ordering::SeqCst) {
            return Err(CoreError::ObjectStorageError("presign failed".to_string()));
        }

        Ok(PresignedUrl {
            url: format!("http://storage.test/ingredients/{object_key}"),
            expires_in_seconds: expires_in.as_secs(),
        })
    }

    async fn delete_object(&self, object_key: &str) -> Result<(), CoreError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(CoreError::ObjectStorageError("delete failed".to_string()));
        }

        self.objects.lock().unwrap().remove(object_key);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct StaticHealthCheck;

impl HealthCheckRepository for StaticHealthCheck {
    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        Ok(DatabaseHealthStatus {
            is_healthy: true,
            response_time_ms: 1,
            error: None,
        })
    }

    async fn health(&self) -> Result<u64, CoreError> {
        Ok(1)
    }
}

pub type TestService = Service<
    InMemoryUserRepository,
    InMemoryTokenRepository,
    PlainHasher,
    InMemoryMedicalProfileRepository,
    InMemoryAnalysisRepository,
    StubLLMClient,
    InMemoryObjectStorage,
    MockRescreenScheduler,
    StaticHealthCheck,
>;

/// Shared handles on the fakes behind a [`TestService`].
#[derive(Clone, Default)]
pub struct Fixtures {
    pub users: InMemoryUserRepository,
    pub tokens: InMemoryTokenRepository,
    pub profiles: InMemoryMedicalProfileRepository,
    pub analyses: InMemoryAnalysisRepository,
    pub llm: StubLLMClient,
    pub storage: InMemoryObjectStorage,
}

impl Fixtures {
    /// Service whose scheduler panics if anything schedules a rescreen.
    pub fn service(&self) -> TestService {
        self.service_with_scheduler(MockRescreenScheduler::new())
    }

    pub fn service_with_scheduler(&self, scheduler: MockRescreenScheduler) -> TestService {
        Service::new(
            self.users.clone(),
            self.tokens.clone(),
            PlainHasher,
            self.profiles.clone(),
            self.analyses.clone(),
            self.llm.clone(),
            self.storage.clone(),
            scheduler,
            StaticHealthCheck,
            TokenConfig::default(),
            Duration::from_secs(5),
        )
    }
}
