pub mod analyze_image;
pub mod delete_saved_analysis;
pub mod get_saved_analyses;
pub mod reanalyze_analysis;
pub mod save_analysis;
