use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::error;

use crate::domain::{common::entities::app_errors::CoreError, crypto::ports::HasherRepository};

/// Argon2id password hashing. Hashing runs on the blocking pool so request
/// tasks are not stalled by the key derivation.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl HasherRepository for Argon2Hasher {
    async fn hash_password(&self, password: String) -> Result<String, CoreError> {
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
        })
        .await
        .map_err(|e| {
            error!("Password hashing task failed: {}", e);
            CoreError::InternalServerError
        })?
        .map_err(|e| {
            error!("Failed to hash password: {}", e);
            CoreError::InternalServerError
        })
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, CoreError> {
        tokio::task::spawn_blocking(move || {
            let Ok(parsed) = PasswordHash::new(&hash) else {
                return false;
            };
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .await
        .map_err(|e| {
            error!("Password verification task failed: {}", e);
            CoreError::InternalServerError
        })
    }
}
