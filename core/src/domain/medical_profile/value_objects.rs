#[derive(Debug, Clone, Default)]
pub struct UpdateMedicalProfileInput {
    pub contraindications: Option<String>,
    pub allergens: Option<String>,
}
