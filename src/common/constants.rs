/// File and directory names that make up the pipeline's on-disk layout.
/// Every phase reads and writes relative to the configured data and reports directories.

// Directories (relative to the base directory)
pub const DATA_DIR_NAME: &str = "data";
pub const REPORTS_DIR_NAME: &str = "reports";

// Datasets inside the data directory
pub const SCRAPED_DATASET_FILE: &str = "fortune_500_data.csv";
pub const RAW_INPUT_DATASET_FILE: &str = "layoffs_Raw.csv";
pub const CLEANED_DATASET_FILE: &str = "layoffs_Cleaned.csv";

// Report inside the reports directory
pub const FINAL_REPORT_FILE: &str = "final_analysis_report.txt";

// Scraper defaults
pub const DEFAULT_SCRAPE_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_largest_companies_in_the_United_States_by_revenue";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_ROWS: usize = 500;

// Phase names used in spans and metric labels
pub const PHASE_SCRAPE: &str = "scrape";
pub const PHASE_CLEAN: &str = "clean";
pub const PHASE_ANALYZE: &str = "analyze";

/// Width of the `=` rule printed around the start and completion banners
pub const BANNER_WIDTH: usize = 60;

/// Cell values treated as missing by both the cleaner and the EDA engine
pub const NULL_TOKENS: &[&str] = &["", "NULL", "null", "Null", "None", "none", "NaN", "nan", "N/A", "n/a", "NA", "-"];

/// Share of non-empty cells that must parse before a column is given a numeric or date type
pub const TYPE_INFERENCE_THRESHOLD: f64 = 0.8;
