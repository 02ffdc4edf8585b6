use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{common::generate_timestamp, screening::token_set::TokenSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MedicalProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contraindications: Option<String>,
    pub allergens: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl MedicalProfile {
    pub fn new(
        user_id: Uuid,
        contraindications: Option<String>,
        allergens: Option<String>,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            contraindications,
            allergens,
            updated_at: now,
        }
    }

    /// Placeholder answered to users who never filled in their profile.
    pub fn empty(user_id: Uuid) -> Self {
        Self::new(user_id, None, None)
    }

    pub fn allergen_tokens(&self) -> TokenSet {
        TokenSet::parse(self.allergens.as_deref())
    }

    pub fn contraindication_tokens(&self) -> TokenSet {
        TokenSet::parse(self.contraindications.as_deref())
    }
}
