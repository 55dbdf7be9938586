pub mod analyzer;
pub mod models;
pub mod utils;

pub use analyzer::{
    analyze_files,
    export_log,
    FrequencyAnalysisResult,
    FrequencyTable,
};
pub use models::TermEntry;
pub use utils::find_markdown_files;
