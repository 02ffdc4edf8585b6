pub mod get_medical_data;
pub mod update_medical_data;
