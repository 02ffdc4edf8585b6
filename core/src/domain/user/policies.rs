use crate::domain::{
    authentication::value_objects::Identity,
    common::{
        entities::app_errors::CoreError,
        policies::{NutriguardPolicy, Policy},
    },
    user::ports::UserPolicy,
};

impl UserPolicy for NutriguardPolicy {
    async fn can_manage_account(&self, identity: Identity) -> Result<bool, CoreError> {
        self.get_active_user(&identity)?;

        Ok(true)
    }

    async fn can_administer_users(&self, identity: Identity) -> Result<bool, CoreError> {
        let user = self.get_active_user(&identity)?;

        Ok(user.role.is_admin())
    }
}
