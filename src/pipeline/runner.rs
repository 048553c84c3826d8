use crate::apis::FortuneCompanyScraper;
use crate::cleaner::LayoffsCleaner;
use crate::common::constants::{BANNER_WIDTH, PHASE_ANALYZE, PHASE_CLEAN, PHASE_SCRAPE};
use crate::common::error::{Result, ToolkitError};
use crate::common::types::{CompanyScraper, DataCleaner, EdaEngine, ScrapeOutcome};
use crate::config::PipelineConfig;
use crate::eda::ComprehensiveEda;
use crate::observability::metrics;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

/// Outcome of the scrape phase
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapePhase {
    Exported { path: PathBuf, rows: usize },
    NoData,
    Failed(String),
}

/// Outcome of the clean phase
#[derive(Debug, Clone, PartialEq)]
pub enum CleanPhase {
    MissingInput { path: PathBuf },
    Cleaned { path: PathBuf, report: String },
    Failed,
    SaveFailed { path: PathBuf, detail: String },
}

/// Outcome of the analyze phase
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzePhase {
    Skipped,
    LoadFailed { path: PathBuf },
    Reported { input: PathBuf, report_path: PathBuf },
    ReportFailed { path: PathBuf, detail: String },
}

/// What happened in each phase of one run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub scrape: ScrapePhase,
    pub clean: CleanPhase,
    pub analyze: AnalyzePhase,
}

impl ScrapePhase {
    fn label(&self) -> &'static str {
        match self {
            ScrapePhase::Exported { .. } => "exported",
            ScrapePhase::NoData => "no_data",
            ScrapePhase::Failed(_) => "failed",
        }
    }
}

impl CleanPhase {
    fn label(&self) -> &'static str {
        match self {
            CleanPhase::MissingInput { .. } => "missing_input",
            CleanPhase::Cleaned { .. } => "cleaned",
            CleanPhase::Failed => "failed",
            CleanPhase::SaveFailed { .. } => "save_failed",
        }
    }
}

impl AnalyzePhase {
    fn label(&self) -> &'static str {
        match self {
            AnalyzePhase::Skipped => "skipped",
            AnalyzePhase::LoadFailed { .. } => "load_failed",
            AnalyzePhase::Reported { .. } => "reported",
            AnalyzePhase::ReportFailed { .. } => "report_failed",
        }
    }
}

impl fmt::Display for ScrapePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapePhase::Exported { path, .. } => {
                write!(f, "✅ Scraping Successful! Saved to {}", path.display())
            }
            ScrapePhase::NoData => {
                write!(f, "⚠️ Scraping returned no data (Check internet connection).")
            }
            ScrapePhase::Failed(detail) => write!(f, "⚠️ Scraping skipped due to error: {detail}"),
        }
    }
}

impl fmt::Display for CleanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanPhase::MissingInput { path } => write!(
                f,
                "❌ Error: {} not found. Please add the CSV file.",
                path.display()
            ),
            CleanPhase::Cleaned { path, report } => write!(
                f,
                "✅ Cleaning Successful! Saved to {}\n{report}",
                path.display()
            ),
            CleanPhase::Failed => write!(f, "❌ Cleaning Failed."),
            CleanPhase::SaveFailed { path, detail } => write!(
                f,
                "❌ Cleaning succeeded but saving {} failed: {detail}",
                path.display()
            ),
        }
    }
}

impl fmt::Display for AnalyzePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzePhase::Skipped => write!(f, "⚠️ Skipping EDA: No data file found to analyze."),
            AnalyzePhase::LoadFailed { .. } => write!(f, "❌ EDA Failed to load data."),
            AnalyzePhase::Reported { report_path, .. } => {
                write!(f, "📄 Final Report generated at: {}", report_path.display())
            }
            AnalyzePhase::ReportFailed { path, detail } => {
                write!(f, "❌ Failed to write report {}: {detail}", path.display())
            }
        }
    }
}

/// Pick the EDA input: the cleaned dataset when it exists, otherwise the raw one
pub fn select_eda_input(cleaned: &Path, raw: &Path) -> Option<PathBuf> {
    [cleaned, raw]
        .into_iter()
        .find(|p| p.exists())
        .map(Path::to_path_buf)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Runs scrape, clean and analyze in order. A phase that fails or lacks input is reported and
/// skipped; it never stops the phases after it.
pub struct PipelineRunner {
    config: PipelineConfig,
    scraper: Box<dyn CompanyScraper>,
    cleaner: Box<dyn DataCleaner>,
    eda: Box<dyn EdaEngine>,
}

impl PipelineRunner {
    pub fn new(
        config: PipelineConfig,
        scraper: Box<dyn CompanyScraper>,
        cleaner: Box<dyn DataCleaner>,
        eda: Box<dyn EdaEngine>,
    ) -> Self {
        Self {
            config,
            scraper,
            cleaner,
            eda,
        }
    }

    /// Runner wired with the Fortune scraper, the layoffs cleaner and the comprehensive EDA engine
    pub fn with_defaults(config: PipelineConfig) -> Self {
        let scraper = FortuneCompanyScraper::new(config.scraper.clone());
        Self::new(
            config,
            Box::new(scraper),
            Box::new(LayoffsCleaner::new()),
            Box::new(ComprehensiveEda::new()),
        )
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Execute the whole pipeline. Only a failure to create the output directories is an error.
    pub fn run(&mut self) -> Result<PipelineReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline", run_id = %run_id);
        let _enter = span.enter();
        metrics::pipeline_run();

        let rule = "=".repeat(BANNER_WIDTH);
        println!("🚀 STARTING DATA ANALYSIS TOOLKIT PIPELINE");
        println!("{rule}");
        info!("Starting pipeline run {}", run_id);

        self.setup()?;

        let scrape = self.run_scrape_phase();
        let clean = self.run_clean_phase();
        let analyze = self.run_analyze_phase();

        println!("\n{rule}");
        println!("🎉 PIPELINE EXECUTION COMPLETE");
        println!("{rule}");
        info!(
            "Pipeline finished: scrape={}, clean={}, analyze={}",
            scrape.label(),
            clean.label(),
            analyze.label()
        );

        Ok(PipelineReport {
            scrape,
            clean,
            analyze,
        })
    }

    fn setup(&self) -> Result<()> {
        for dir in [&self.config.data_dir, &self.config.reports_dir] {
            fs::create_dir_all(dir).map_err(|source| {
                error!("Could not create {}: {}", dir.display(), source);
                ToolkitError::Setup {
                    path: dir.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }

    fn run_scrape_phase(&mut self) -> ScrapePhase {
        let _span = info_span!("phase", phase = PHASE_SCRAPE).entered();
        let started = Instant::now();
        println!("\n[PHASE 1] Executing Web Scraper...");

        let dest = self.config.scraped_dataset_path();
        let outcome = match self.scraper.scrape_and_export(&dest) {
            ScrapeOutcome::Exported(stats) => ScrapePhase::Exported {
                path: stats.path,
                rows: stats.rows,
            },
            ScrapeOutcome::Empty => ScrapePhase::NoData,
            ScrapeOutcome::Failed(e) => ScrapePhase::Failed(e.to_string()),
        };

        println!("{outcome}");
        match &outcome {
            ScrapePhase::Exported { path, rows } => {
                info!("Scraped {} rows into {}", rows, path.display());
                self.scraper.display_summary();
            }
            ScrapePhase::NoData => warn!("Scraper returned no data"),
            ScrapePhase::Failed(detail) => warn!("Scrape phase skipped: {}", detail),
        }

        metrics::phases::outcome(PHASE_SCRAPE, outcome.label());
        metrics::phases::duration(PHASE_SCRAPE, started.elapsed().as_secs_f64());
        outcome
    }

    fn run_clean_phase(&mut self) -> CleanPhase {
        let _span = info_span!("phase", phase = PHASE_CLEAN).entered();
        let started = Instant::now();
        println!("\n[PHASE 2] Executing Data Cleaning Pipeline...");

        let raw = &self.config.input_dataset_path;
        let cleaned = self.config.cleaned_dataset_path();

        let outcome = if !raw.exists() {
            error!("Raw input dataset {} is missing", raw.display());
            CleanPhase::MissingInput { path: raw.clone() }
        } else if !self.cleaner.clean_all(raw) {
            error!("Cleaning {} failed", raw.display());
            CleanPhase::Failed
        } else {
            match self.cleaner.save_cleaned_data(&cleaned) {
                Ok(()) => {
                    info!("Cleaned dataset written to {}", cleaned.display());
                    CleanPhase::Cleaned {
                        path: cleaned,
                        report: self.cleaner.generate_cleaning_report(),
                    }
                }
                Err(e) => {
                    error!("Saving cleaned dataset failed: {}", e);
                    CleanPhase::SaveFailed {
                        path: cleaned,
                        detail: e.to_string(),
                    }
                }
            }
        };

        println!("{outcome}");
        metrics::phases::outcome(PHASE_CLEAN, outcome.label());
        metrics::phases::duration(PHASE_CLEAN, started.elapsed().as_secs_f64());
        outcome
    }

    fn run_analyze_phase(&mut self) -> AnalyzePhase {
        let _span = info_span!("phase", phase = PHASE_ANALYZE).entered();
        let started = Instant::now();
        println!("\n[PHASE 3] Executing Automated EDA...");

        let cleaned = self.config.cleaned_dataset_path();
        let outcome = match select_eda_input(&cleaned, &self.config.input_dataset_path) {
            None => {
                warn!("No dataset available for EDA");
                AnalyzePhase::Skipped
            }
            Some(input) => {
                println!("📊 Analyzing data from: {}", file_name(&input));
                info!("EDA input selected: {}", input.display());
                self.analyze(input)
            }
        };

        println!("{outcome}");
        metrics::phases::outcome(PHASE_ANALYZE, outcome.label());
        metrics::phases::duration(PHASE_ANALYZE, started.elapsed().as_secs_f64());
        outcome
    }

    fn analyze(&mut self, input: PathBuf) -> AnalyzePhase {
        if !self.eda.load_data(&input) {
            error!("EDA could not load {}", input.display());
            return AnalyzePhase::LoadFailed { path: input };
        }

        self.eda.run_complete_eda();

        let report_path = self.config.report_path();
        match self.eda.generate_comprehensive_report(&report_path) {
            Ok(()) => AnalyzePhase::Reported { input, report_path },
            Err(e) => {
                error!("Writing EDA report failed: {}", e);
                AnalyzePhase::ReportFailed {
                    path: report_path,
                    detail: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_select_prefers_cleaned() {
        let dir = tempdir().unwrap();
        let cleaned = dir.path().join("cleaned.csv");
        let raw = dir.path().join("raw.csv");

        assert_eq!(select_eda_input(&cleaned, &raw), None);

        fs::write(&raw, "a\n1\n").unwrap();
        assert_eq!(select_eda_input(&cleaned, &raw), Some(raw.clone()));

        fs::write(&cleaned, "a\n1\n").unwrap();
        assert_eq!(select_eda_input(&cleaned, &raw), Some(cleaned.clone()));

        fs::remove_file(&raw).unwrap();
        assert_eq!(select_eda_input(&cleaned, &raw), Some(cleaned));
    }

    #[test]
    fn test_phase_messages() {
        let missing = CleanPhase::MissingInput {
            path: PathBuf::from("data/layoffs_Raw.csv"),
        };
        assert_eq!(
            missing.to_string(),
            "❌ Error: data/layoffs_Raw.csv not found. Please add the CSV file."
        );
        assert_eq!(
            AnalyzePhase::Skipped.to_string(),
            "⚠️ Skipping EDA: No data file found to analyze."
        );
        assert_eq!(
            ScrapePhase::Failed("timed out".into()).to_string(),
            "⚠️ Scraping skipped due to error: timed out"
        );
        assert_eq!(
            ScrapePhase::NoData.to_string(),
            "⚠️ Scraping returned no data (Check internet connection)."
        );
        assert_eq!(
            ScrapePhase::Exported {
                path: PathBuf::from("data/fortune_500_data.csv"),
                rows: 3
            }
            .to_string(),
            "✅ Scraping Successful! Saved to data/fortune_500_data.csv"
        );
        assert_eq!(CleanPhase::Failed.to_string(), "❌ Cleaning Failed.");
        assert_eq!(
            CleanPhase::Cleaned {
                path: PathBuf::from("data/layoffs_Cleaned.csv"),
                report: "=== DATA CLEANING REPORT ===".into()
            }
            .to_string(),
            "✅ Cleaning Successful! Saved to data/layoffs_Cleaned.csv\n=== DATA CLEANING REPORT ==="
        );
        assert_eq!(
            AnalyzePhase::LoadFailed {
                path: PathBuf::from("data/layoffs_Raw.csv")
            }
            .to_string(),
            "❌ EDA Failed to load data."
        );
        assert_eq!(
            AnalyzePhase::Reported {
                input: PathBuf::from("data/layoffs_Cleaned.csv"),
                report_path: PathBuf::from("reports/final_analysis_report.txt"),
            }
            .to_string(),
            "📄 Final Report generated at: reports/final_analysis_report.txt"
        );
    }

    #[test]
    fn test_file_name_is_basename() {
        assert_eq!(file_name(Path::new("/tmp/data/layoffs_Cleaned.csv")), "layoffs_Cleaned.csv");
    }
}
