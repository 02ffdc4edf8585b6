use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone)]
pub struct UpdateUserRoleInput {
    pub user_id: Uuid,
    pub role: String,
}

pub const MIN_PASSWORD_LENGTH: usize = 6;
