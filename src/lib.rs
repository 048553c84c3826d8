//! Data analysis toolkit: scrape a public company dataset, clean a tabular dataset, then run
//! exploratory analysis over it and write a text report.

pub mod apis;
pub mod app;
pub mod cleaner;
pub mod common;
pub mod config;
pub mod dataset;
pub mod eda;
pub mod infra;
pub mod observability;
pub mod pipeline;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use pipeline::{PipelineReport, PipelineRunner};
