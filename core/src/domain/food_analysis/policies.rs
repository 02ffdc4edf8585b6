use crate::domain::{
    authentication::value_objects::Identity,
    common::{
        entities::app_errors::CoreError,
        policies::{NutriguardPolicy, Policy},
    },
    food_analysis::ports::FoodAnalysisPolicy,
};

impl FoodAnalysisPolicy for NutriguardPolicy {
    async fn can_analyze_food(&self, identity: Identity) -> Result<bool, CoreError> {
        self.get_active_user(&identity)?;

        Ok(true)
    }

    async fn can_manage_analyses(&self, identity: Identity) -> Result<bool, CoreError> {
        self.get_active_user(&identity)?;

        Ok(true)
    }
}
