#![allow(dead_code)]

use data_toolkit::common::error::{Result, ToolkitError};
use data_toolkit::common::types::{
    CompanyScraper, DataCleaner, EdaEngine, ScrapeOutcome, ScrapeStats,
};
use data_toolkit::dataset::Dataset;
use data_toolkit::eda::ComprehensiveEda;
use data_toolkit::PipelineConfig;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// Raw layoffs extract with 8 data rows: two exact duplicates, one blank row, one row that only
/// duplicates another after its number and date are normalized.
pub const RAW_LAYOFFS: &str = "\
Company,Location,Industry,Total Laid Off,Percentage Laid Off,Date,Country
Acme,Seattle,Retail,100,0.1,3/6/2023,United States
Globex,Austin,Crypto,\"1,200\",0.25,3/7/2023,United States
Acme,Seattle,Retail,100,0.1,3/6/2023,United States
Initech,Toronto,Finance,NULL,N/A,2023-01-15,Canada
,,,,,,
Hooli, Palo Alto ,Consumer,450,0.05,12/1/2022,United States
Globex,Austin,Crypto,1200,0.25,2023-03-07,United States
Umbrella,Berlin,Healthcare,75,0.3,2/20/2023,Germany
";

pub struct TestEnv {
    _tmp: TempDir,
    pub base: PathBuf,
    pub config: PipelineConfig,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let base = tmp.path().join("toolkit");
        let config = PipelineConfig::for_base_dir(&base);
        Self {
            _tmp: tmp,
            base,
            config,
        }
    }

    /// Place the externally supplied raw dataset
    pub fn write_raw(&self, content: &str) {
        write_file(&self.config.input_dataset_path, content);
    }

    pub fn write_cleaned(&self, content: &str) {
        write_file(&self.config.cleaned_dataset_path(), content);
    }
}

pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().expect("path has parent")).expect("create parent dir");
    fs::write(path, content).expect("write file");
}

/// Scraper double with a fixed behaviour
pub enum StubScraper {
    /// Writes a small company table
    Succeeds,
    Empty,
    Fails(String),
}

impl CompanyScraper for StubScraper {
    fn scrape_and_export(&mut self, dest: &Path) -> ScrapeOutcome {
        match self {
            StubScraper::Succeeds => {
                let dataset = Dataset::new(
                    vec!["Rank".into(), "Name".into(), "Revenue".into()],
                    vec![
                        vec!["1".into(), "Walmart".into(), "648,125".into()],
                        vec!["2".into(), "Amazon".into(), "574,785".into()],
                    ],
                );
                if let Err(e) = dataset.to_csv_path(dest) {
                    return ScrapeOutcome::Failed(e);
                }
                ScrapeOutcome::Exported(ScrapeStats {
                    path: dest.to_path_buf(),
                    rows: 2,
                    columns: 3,
                    preview: vec!["1 - Walmart".into(), "2 - Amazon".into()],
                })
            }
            StubScraper::Empty => ScrapeOutcome::Empty,
            StubScraper::Fails(message) => ScrapeOutcome::Failed(ToolkitError::Api {
                message: message.clone(),
            }),
        }
    }

    fn summary(&self) -> Option<String> {
        matches!(self, StubScraper::Succeeds).then(|| "   Companies scraped: 2".to_string())
    }
}

/// Cleaner double that always reports failure and never writes anything
pub struct FailingCleaner;

impl DataCleaner for FailingCleaner {
    fn clean_all(&mut self, _source: &Path) -> bool {
        false
    }

    fn save_cleaned_data(&self, _dest: &Path) -> Result<()> {
        panic!("save must not be called after a failed clean");
    }

    fn generate_cleaning_report(&self) -> String {
        String::new()
    }
}

/// Real EDA engine that remembers every path it was asked to load
pub struct RecordingEda {
    inner: ComprehensiveEda,
    pub loads: Rc<RefCell<Vec<PathBuf>>>,
}

impl RecordingEda {
    pub fn new() -> (Self, Rc<RefCell<Vec<PathBuf>>>) {
        let loads = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                inner: ComprehensiveEda::new(),
                loads: Rc::clone(&loads),
            },
            loads,
        )
    }
}

impl EdaEngine for RecordingEda {
    fn load_data(&mut self, source: &Path) -> bool {
        self.loads.borrow_mut().push(source.to_path_buf());
        self.inner.load_data(source)
    }

    fn run_complete_eda(&mut self) {
        self.inner.run_complete_eda();
    }

    fn generate_comprehensive_report(&mut self, dest: &Path) -> Result<()> {
        self.inner.generate_comprehensive_report(dest)
    }
}
