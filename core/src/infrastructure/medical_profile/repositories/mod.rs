pub mod medical_profile_repository;
