pub mod delete_user;
pub mod list_users;
pub mod update_user_role;
