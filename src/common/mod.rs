// Common utilities and shared types used across the application

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items at module root for convenience
pub use error::{Result, ToolkitError};
pub use types::{CompanyScraper, DataCleaner, EdaEngine, ScrapeOutcome, ScrapeStats};
