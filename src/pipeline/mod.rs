// Sequential scrape -> clean -> analyze pipeline

pub mod runner;

// Re-export key types
pub use runner::{
    select_eda_input, AnalyzePhase, CleanPhase, PipelineReport, PipelineRunner, ScrapePhase,
};
