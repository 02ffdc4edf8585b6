pub mod analysis_result;
pub mod saved_analysis;

pub use analysis_result::*;
pub use saved_analysis::*;
