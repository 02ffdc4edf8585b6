use crate::domain::{
    authentication::value_objects::Identity, common::entities::app_errors::CoreError,
    user::entities::User,
};

/// Turns a policy answer into a `Forbidden` error when access is denied.
pub fn ensure_policy(result: Result<bool, CoreError>, message: &str) -> Result<(), CoreError> {
    match result {
        Ok(true) => Ok(()),
        Ok(false) => Err(CoreError::Forbidden(message.to_string())),
        Err(e) => Err(e),
    }
}

pub trait Policy: Send + Sync {
    /// Returns the user behind the identity, refusing banned accounts.
    fn get_active_user<'a>(&self, identity: &'a Identity) -> Result<&'a User, CoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct NutriguardPolicy;

impl NutriguardPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for NutriguardPolicy {
    fn get_active_user<'a>(&self, identity: &'a Identity) -> Result<&'a User, CoreError> {
        let user = identity.user();

        if user.role.is_banned() {
            return Err(CoreError::Banned);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::user::entities::UserRole;

    #[test]
    fn ensure_policy_maps_denial_to_forbidden() {
        assert_eq!(ensure_policy(Ok(true), "nope"), Ok(()));
        assert_eq!(
            ensure_policy(Ok(false), "nope"),
            Err(CoreError::Forbidden("nope".to_string()))
        );
        assert_eq!(
            ensure_policy(Err(CoreError::Banned), "nope"),
            Err(CoreError::Banned)
        );
    }

    #[test]
    fn banned_users_are_not_active() {
        let policy = NutriguardPolicy::new();
        let mut user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        let identity = Identity::new(user.clone());
        assert!(policy.get_active_user(&identity).is_ok());

        user.role = UserRole::Banned;
        let identity = Identity::new(user);
        assert_eq!(
            policy.get_active_user(&identity).unwrap_err(),
            CoreError::Banned
        );
    }
}
