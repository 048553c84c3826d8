use crate::common::constants::{
    CLEANED_DATASET_FILE, DATA_DIR_NAME, DEFAULT_MAX_ROWS, DEFAULT_SCRAPE_URL,
    DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT, FINAL_REPORT_FILE, RAW_INPUT_DATASET_FILE,
    REPORTS_DIR_NAME, SCRAPED_DATASET_FILE,
};
use crate::common::error::{Result, ToolkitError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the pipeline runner needs to know about where files live
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Output location for datasets
    pub data_dir: PathBuf,
    /// Output location for reports
    pub reports_dir: PathBuf,
    /// Externally supplied raw CSV for the cleaning phase
    pub input_dataset_path: PathBuf,
    pub scraper: ScraperConfig,
    /// When set, JSON logs are also written here with daily rotation
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScraperConfig {
    pub url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub max_rows: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SCRAPE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// On-disk shape of the optional TOML file; every key may be omitted
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    reports_dir: Option<PathBuf>,
    input_dataset_path: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    #[serde(default)]
    scraper: ScraperConfig,
}

impl PipelineConfig {
    /// The standard layout: `<base>/data`, `<base>/reports` and `<base>/data/layoffs_Raw.csv`
    pub fn for_base_dir(base_dir: &Path) -> Self {
        let data_dir = base_dir.join(DATA_DIR_NAME);
        Self {
            input_dataset_path: data_dir.join(RAW_INPUT_DATASET_FILE),
            reports_dir: base_dir.join(REPORTS_DIR_NAME),
            data_dir,
            scraper: ScraperConfig::default(),
            log_dir: None,
        }
    }

    /// Load overrides from a TOML file. Relative paths resolve against `base_dir`.
    pub fn load(base_dir: &Path, config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path).map_err(|e| {
            ToolkitError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::from_toml_str(base_dir, &content)
    }

    pub fn from_toml_str(base_dir: &Path, content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let defaults = Self::for_base_dir(base_dir);
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base_dir.join(p) };

        let data_dir = file.data_dir.map(resolve).unwrap_or(defaults.data_dir);
        let input_dataset_path = file
            .input_dataset_path
            .map(resolve)
            .unwrap_or_else(|| data_dir.join(RAW_INPUT_DATASET_FILE));

        if file.scraper.max_rows == 0 {
            return Err(ToolkitError::Config(
                "scraper.max_rows must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            reports_dir: file.reports_dir.map(resolve).unwrap_or(defaults.reports_dir),
            input_dataset_path,
            data_dir,
            scraper: file.scraper,
            log_dir: file.log_dir.map(resolve),
        })
    }

    pub fn scraped_dataset_path(&self) -> PathBuf {
        self.data_dir.join(SCRAPED_DATASET_FILE)
    }

    pub fn cleaned_dataset_path(&self) -> PathBuf {
        self.data_dir.join(CLEANED_DATASET_FILE)
    }

    pub fn report_path(&self) -> PathBuf {
        self.reports_dir.join(FINAL_REPORT_FILE)
    }
}
