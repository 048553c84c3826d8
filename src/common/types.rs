use crate::common::error::{Result, ToolkitError};
use std::path::{Path, PathBuf};

/// What a scraper produced for one export request
#[derive(Debug)]
pub enum ScrapeOutcome {
    /// Rows were scraped and written to disk
    Exported(ScrapeStats),
    /// The source answered but yielded no rows
    Empty,
    /// The scrape could not be completed
    Failed(ToolkitError),
}

/// Summary of a successful scrape
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeStats {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    /// Leading cells of the first few rows, for console summaries
    pub preview: Vec<String>,
}

/// Core trait for the web scraping collaborator
pub trait CompanyScraper {
    /// Scrape the source and write the result as CSV to `dest`
    fn scrape_and_export(&mut self, dest: &Path) -> ScrapeOutcome;

    /// Human readable summary of the last successful scrape, if any
    fn summary(&self) -> Option<String>;

    /// Print the summary of the last scrape to the console
    fn display_summary(&self) {
        match self.summary() {
            Some(summary) => println!("{summary}"),
            None => println!("   No scrape has completed yet."),
        }
    }
}

/// Core trait for the data cleaning collaborator
pub trait DataCleaner {
    /// Load and clean the CSV at `source`, replacing any previously cleaned state.
    /// Returns false when cleaning could not produce a usable dataset.
    fn clean_all(&mut self, source: &Path) -> bool;

    /// Write the cleaned dataset to `dest`
    fn save_cleaned_data(&self, dest: &Path) -> Result<()>;

    /// Multi-line summary of the cleaning actions taken
    fn generate_cleaning_report(&self) -> String;
}

/// Core trait for the exploratory analysis collaborator
pub trait EdaEngine {
    /// Load the CSV at `source`. Returns false when it cannot be read.
    fn load_data(&mut self, source: &Path) -> bool;

    /// Run every analysis over the loaded dataset
    fn run_complete_eda(&mut self);

    /// Write the textual analysis report to `dest`
    fn generate_comprehensive_report(&mut self, dest: &Path) -> Result<()>;
}
