use std::time::Duration;

use crate::domain::common::{TokenConfig, policies::NutriguardPolicy};

/// Application service. Every domain service trait is implemented on this struct,
/// with each collaborator injected as a generic port.
#[derive(Clone)]
pub struct Service<U, T, H, MP, A, LLM, OS, RS, HC> {
    pub(crate) user_repository: U,
    pub(crate) token_repository: T,
    pub(crate) hasher_repository: H,
    pub(crate) medical_profile_repository: MP,
    pub(crate) analysis_repository: A,
    pub(crate) llm_client: LLM,
    pub(crate) object_storage: OS,
    pub(crate) rescreen_scheduler: RS,
    pub(crate) health_check_repository: HC,
    pub(crate) policy: NutriguardPolicy,
    pub(crate) token_config: TokenConfig,
    pub(crate) llm_timeout: Duration,
}

impl<U, T, H, MP, A, LLM, OS, RS, HC> Service<U, T, H, MP, A, LLM, OS, RS, HC> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repository: U,
        token_repository: T,
        hasher_repository: H,
        medical_profile_repository: MP,
        analysis_repository: A,
        llm_client: LLM,
        object_storage: OS,
        rescreen_scheduler: RS,
        health_check_repository: HC,
        token_config: TokenConfig,
        llm_timeout: Duration,
    ) -> Self {
        Self {
            user_repository,
            token_repository,
            hasher_repository,
            medical_profile_repository,
            analysis_repository,
            llm_client,
            object_storage,
            rescreen_scheduler,
            health_check_repository,
            policy: NutriguardPolicy::new(),
            token_config,
            llm_timeout,
        }
    }
}
