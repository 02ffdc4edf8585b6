pub mod authentication;
pub mod common;
pub mod crypto;
pub mod food_analysis;
pub mod health;
pub mod medical_profile;
pub mod screening;
pub mod storage;
pub mod user;
