pub mod authentication;
pub mod crypto;
pub mod db;
pub mod food_analysis;
pub mod health;
pub mod llm;
pub mod medical_profile;
pub mod object_storage;
pub mod screening;
pub mod user;
