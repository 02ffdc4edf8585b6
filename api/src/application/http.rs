pub mod admin;
pub mod analysis;
pub mod authentication;
pub mod health;
pub mod medical;
pub mod server;
pub mod user;
