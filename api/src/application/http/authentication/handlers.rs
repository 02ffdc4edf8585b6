pub mod cleanup_tokens;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh_token;
pub mod register;
