pub mod health_live;
pub mod health_ready;
pub mod root;
