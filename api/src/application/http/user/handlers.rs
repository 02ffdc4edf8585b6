pub mod change_password;
pub mod delete_account;
pub mod update_profile;
