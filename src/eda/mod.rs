//! Exploratory data analysis collaborator.
//!
//! `ComprehensiveEda` profiles a loaded CSV column by column, summarises numeric, text and date
//! columns, correlates numeric pairs, and renders everything as a plain-text report.

pub mod report;
pub mod stats;

use crate::common::error::{Result, ToolkitError};
use crate::common::types::EdaEngine;
use crate::dataset::values::{self, ColumnType};
use crate::dataset::Dataset;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use stats::NumericSummary;
use tracing::{error, info, instrument, warn};

const TOP_VALUES: usize = 5;
/// Correlations at or above this magnitude are called out in the report
pub const STRONG_CORRELATION: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub rows: usize,
    pub columns: usize,
    pub total_cells: usize,
    pub missing_cells: usize,
    pub duplicate_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub column_type: ColumnType,
    pub non_null: usize,
    pub missing: usize,
    pub missing_pct: f64,
    pub unique: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    pub left: String,
    pub right: String,
    pub coefficient: f64,
    pub pairs: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub column: String,
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

/// Everything `run_complete_eda` computes
#[derive(Debug, Clone, PartialEq)]
pub struct EdaResults {
    pub overview: Overview,
    pub columns: Vec<ColumnProfile>,
    pub numeric: Vec<(String, NumericSummary)>,
    pub top_values: Vec<(String, Vec<(String, usize)>)>,
    pub date_ranges: Vec<DateRange>,
    pub correlations: Vec<Correlation>,
}

#[derive(Debug, Default)]
pub struct ComprehensiveEda {
    source: Option<PathBuf>,
    dataset: Option<Dataset>,
    results: Option<EdaResults>,
}

impl ComprehensiveEda {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn results(&self) -> Option<&EdaResults> {
        self.results.as_ref()
    }
}

impl EdaEngine for ComprehensiveEda {
    fn load_data(&mut self, source: &Path) -> bool {
        self.results = None;
        match Dataset::from_csv_path(source) {
            Ok(dataset) => {
                info!(
                    "Loaded {} rows x {} columns for analysis from {}",
                    dataset.row_count(),
                    dataset.column_count(),
                    source.display()
                );
                self.dataset = Some(dataset);
                self.source = Some(source.to_path_buf());
                true
            }
            Err(e) => {
                error!("Failed to load {} for analysis: {}", source.display(), e);
                self.dataset = None;
                self.source = None;
                false
            }
        }
    }

    #[instrument(skip(self))]
    fn run_complete_eda(&mut self) {
        let Some(dataset) = &self.dataset else {
            warn!("EDA requested before any data was loaded");
            return;
        };
        let results = analyze(dataset);
        info!(
            "EDA complete: {} numeric, {} text, {} date columns, {} correlations",
            results.numeric.len(),
            results.top_values.len(),
            results.date_ranges.len(),
            results.correlations.len()
        );
        self.results = Some(results);
    }

    fn generate_comprehensive_report(&mut self, dest: &Path) -> Result<()> {
        if self.dataset.is_none() {
            return Err(ToolkitError::EmptyDataset(
                "no data loaded for the EDA report".to_string(),
            ));
        }
        if self.results.is_none() {
            self.run_complete_eda();
        }
        let results = self.results.as_ref().ok_or_else(|| {
            ToolkitError::EmptyDataset("analysis produced no results".to_string())
        })?;

        let source_name = self
            .source
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = report::render(&source_name, results, chrono::Utc::now());

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, text)?;
        info!("Wrote EDA report to {}", dest.display());
        Ok(())
    }
}

/// Compute every section of the analysis for `dataset`
pub fn analyze(dataset: &Dataset) -> EdaResults {
    let column_types: Vec<ColumnType> = (0..dataset.column_count())
        .map(|i| values::infer_column_type(dataset.column(i)))
        .collect();

    let mut columns = Vec::with_capacity(dataset.column_count());
    let mut numeric = Vec::new();
    let mut top_values = Vec::new();
    let mut date_ranges = Vec::new();
    let mut missing_cells = 0;

    for (i, name) in dataset.headers.iter().enumerate() {
        let column_type = column_types[i];
        let present: Vec<&str> = dataset.column(i).filter(|c| !values::is_null(c)).collect();
        let missing = dataset.row_count() - present.len();
        missing_cells += missing;

        columns.push(ColumnProfile {
            name: name.clone(),
            column_type,
            non_null: present.len(),
            missing,
            missing_pct: percent(missing, dataset.row_count()),
            unique: present.iter().collect::<HashSet<_>>().len(),
        });

        match column_type {
            ColumnType::Integer | ColumnType::Float => {
                let nums = values::numeric_values(present.iter().copied());
                if let Some(summary) = NumericSummary::from_values(&nums) {
                    numeric.push((name.clone(), summary));
                }
            }
            ColumnType::Date => {
                let dates: Vec<NaiveDate> =
                    present.iter().filter_map(|c| values::parse_date(c)).collect();
                if let (Some(earliest), Some(latest)) = (dates.iter().min(), dates.iter().max()) {
                    date_ranges.push(DateRange {
                        column: name.clone(),
                        earliest: *earliest,
                        latest: *latest,
                    });
                }
            }
            ColumnType::Text => {
                top_values.push((name.clone(), most_frequent(&present, TOP_VALUES)));
            }
        }
    }

    let distinct_rows: HashSet<&Vec<String>> = dataset.rows.iter().collect();

    EdaResults {
        overview: Overview {
            rows: dataset.row_count(),
            columns: dataset.column_count(),
            total_cells: dataset.row_count() * dataset.column_count(),
            missing_cells,
            duplicate_rows: dataset.row_count() - distinct_rows.len(),
        },
        columns,
        numeric,
        top_values,
        date_ranges,
        correlations: correlations(dataset, &column_types),
    }
}

/// Most frequent values, ties broken alphabetically
fn most_frequent(cells: &[&str], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for cell in cells {
        *counts.entry(*cell).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

fn correlations(dataset: &Dataset, column_types: &[ColumnType]) -> Vec<Correlation> {
    let numeric_columns: Vec<usize> = column_types
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_numeric())
        .map(|(i, _)| i)
        .collect();

    let mut found = Vec::new();
    for (a, &left) in numeric_columns.iter().enumerate() {
        for &right in &numeric_columns[a + 1..] {
            let pairs: Vec<(f64, f64)> = dataset
                .rows
                .iter()
                .filter_map(|row| {
                    let x = values::parse_number(&row[left])?;
                    let y = values::parse_number(&row[right])?;
                    Some((x.value, y.value))
                })
                .collect();
            if let Some(coefficient) = stats::pearson(&pairs) {
                found.push(Correlation {
                    left: dataset.headers[left].clone(),
                    right: dataset.headers[right].clone(),
                    coefficient,
                    pairs: pairs.len(),
                });
            }
        }
    }
    found
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
