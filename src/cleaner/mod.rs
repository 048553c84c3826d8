//! Data cleaning collaborator.
//!
//! `LayoffsCleaner` takes a raw CSV through a fixed sequence of passes (see [`steps`]) and keeps
//! the result in memory until it is saved.

pub mod steps;

use crate::common::error::{Result, ToolkitError};
use crate::common::types::DataCleaner;
use crate::dataset::values::ColumnType;
use crate::dataset::Dataset;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument};

/// What one cleaning run changed
#[derive(Debug, Clone, Default)]
pub struct CleaningStats {
    pub source: PathBuf,
    pub rows_before: usize,
    pub rows_after: usize,
    pub renamed_headers: Vec<(String, String)>,
    pub trimmed_cells: usize,
    pub nulls_normalized: usize,
    pub blank_rows_removed: usize,
    pub duplicates_removed: usize,
    pub coerced_cells: usize,
    pub column_types: Vec<(String, ColumnType)>,
    pub missing_per_column: Vec<(String, usize)>,
}

#[derive(Debug, Default)]
pub struct LayoffsCleaner {
    cleaned: Option<Dataset>,
    stats: Option<CleaningStats>,
}

impl LayoffsCleaner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cleaned_data(&self) -> Option<&Dataset> {
        self.cleaned.as_ref()
    }

    pub fn stats(&self) -> Option<&CleaningStats> {
        self.stats.as_ref()
    }

    /// Run every cleaning pass over the CSV at `source`
    #[instrument(skip(self, source), fields(source = %source.display()))]
    pub fn clean(&mut self, source: &Path) -> Result<&Dataset> {
        self.cleaned = None;
        self.stats = None;

        let mut dataset = Dataset::from_csv_path(source)?;
        let mut stats = CleaningStats {
            source: source.to_path_buf(),
            rows_before: dataset.row_count(),
            ..CleaningStats::default()
        };

        stats.renamed_headers = steps::normalize_headers(&mut dataset);
        stats.trimmed_cells = steps::trim_cells(&mut dataset);
        stats.nulls_normalized = steps::normalize_nulls(&mut dataset);
        stats.blank_rows_removed = steps::drop_blank_rows(&mut dataset);
        stats.duplicates_removed = steps::drop_duplicates(&mut dataset);

        let column_types = steps::infer_types(&dataset);
        stats.coerced_cells = steps::fix_types(&mut dataset, &column_types);
        // Canonical numbers and dates can turn near-duplicates into exact ones
        stats.duplicates_removed += steps::drop_duplicates(&mut dataset);
        debug!("Inferred column types: {:?}", column_types);

        if dataset.is_empty() {
            return Err(ToolkitError::EmptyDataset(format!(
                "no rows left after cleaning {}",
                source.display()
            )));
        }

        stats.rows_after = dataset.row_count();
        stats.column_types = dataset
            .headers
            .iter()
            .cloned()
            .zip(column_types)
            .collect();
        stats.missing_per_column = dataset
            .headers
            .iter()
            .cloned()
            .zip(steps::missing_per_column(&dataset))
            .collect();

        info!(
            "Cleaned {}: {} -> {} rows ({} duplicates, {} blank rows removed)",
            source.display(),
            stats.rows_before,
            stats.rows_after,
            stats.duplicates_removed,
            stats.blank_rows_removed
        );

        self.stats = Some(stats);
        Ok(self.cleaned.insert(dataset))
    }
}

impl DataCleaner for LayoffsCleaner {
    fn clean_all(&mut self, source: &Path) -> bool {
        match self.clean(source) {
            Ok(_) => true,
            Err(e) => {
                error!("Cleaning failed for {}: {}", source.display(), e);
                false
            }
        }
    }

    fn save_cleaned_data(&self, dest: &Path) -> Result<()> {
        let dataset = self.cleaned.as_ref().ok_or_else(|| {
            ToolkitError::EmptyDataset("nothing has been cleaned yet".to_string())
        })?;
        dataset.to_csv_path(dest)?;
        info!("Saved cleaned data to {}", dest.display());
        Ok(())
    }

    fn generate_cleaning_report(&self) -> String {
        let Some(stats) = &self.stats else {
            return "No cleaning has been performed.".to_string();
        };

        let mut lines = vec![
            "=== DATA CLEANING REPORT ===".to_string(),
            format!("Source: {}", stats.source.display()),
            format!("Rows before cleaning: {}", stats.rows_before),
            format!("Rows after cleaning: {}", stats.rows_after),
            format!("Columns: {}", stats.column_types.len()),
            format!("Blank rows removed: {}", stats.blank_rows_removed),
            format!("Duplicate rows removed: {}", stats.duplicates_removed),
            format!("Cells trimmed: {}", stats.trimmed_cells),
            format!("Null markers normalized: {}", stats.nulls_normalized),
            format!("Invalid values coerced to null: {}", stats.coerced_cells),
        ];

        if !stats.renamed_headers.is_empty() {
            lines.push("Renamed columns:".to_string());
            lines.extend(
                stats
                    .renamed_headers
                    .iter()
                    .map(|(old, new)| format!("  '{old}' -> '{new}'")),
            );
        }

        lines.push("Column types:".to_string());
        lines.extend(
            stats
                .column_types
                .iter()
                .map(|(name, column_type)| format!("  {name}: {column_type}")),
        );

        let missing: Vec<String> = stats
            .missing_per_column
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(name, count)| format!("  {name}: {count}"))
            .collect();
        if missing.is_empty() {
            lines.push("Missing values: none".to_string());
        } else {
            lines.push("Missing values:".to_string());
            lines.extend(missing);
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const RAW: &str = "\
Company,Location,Total Laid Off,Date,Funds Raised
Acme , Seattle,100,3/6/2023,$1200
Acme,Seattle,100,2023-03-06,1200
Globex,Austin,NULL,3/7/2023,50
,,,,
Initech,Austin,\"1,000\",3/8/2023,N/A
Globex,Austin,NULL,3/7/2023,50
";

    #[test]
    fn test_clean_all_removes_duplicates_and_fixes_types() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("raw.csv");
        fs::write(&source, RAW).unwrap();
        let mut cleaner = LayoffsCleaner::new();

        assert!(cleaner.clean_all(&source));

        let data = cleaner.cleaned_data().unwrap();
        assert_eq!(
            data.headers,
            vec!["company", "location", "total_laid_off", "date", "funds_raised"]
        );
        assert_eq!(data.row_count(), 3);
        assert_eq!(data.rows[0], vec!["Acme", "Seattle", "100", "2023-03-06", "1200"]);
        assert_eq!(data.rows[1], vec!["Globex", "Austin", "", "2023-03-07", "50"]);
        assert_eq!(data.rows[2][2], "1000");

        let stats = cleaner.stats().unwrap();
        assert_eq!(stats.rows_before, 6);
        assert_eq!(stats.rows_after, 3);
        assert_eq!(stats.blank_rows_removed, 1);
        assert_eq!(stats.duplicates_removed, 2);
    }

    #[test]
    fn test_report_lists_actions() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("raw.csv");
        fs::write(&source, RAW).unwrap();
        let mut cleaner = LayoffsCleaner::new();
        assert!(cleaner.clean_all(&source));

        let report = cleaner.generate_cleaning_report();

        assert!(report.contains("Rows before cleaning: 6"));
        assert!(report.contains("Rows after cleaning: 3"));
        assert!(report.contains("'Total Laid Off' -> 'total_laid_off'"));
        assert!(report.contains("total_laid_off: integer"));
        assert!(report.contains("date: date"));
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempdir().unwrap();
        let mut cleaner = LayoffsCleaner::new();

        assert!(!cleaner.clean_all(&dir.path().join("nope.csv")));
        assert!(cleaner.cleaned_data().is_none());
        assert_eq!(cleaner.generate_cleaning_report(), "No cleaning has been performed.");
    }

    #[test]
    fn test_header_only_file_fails() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("raw.csv");
        fs::write(&source, "company,country\n").unwrap();
        let mut cleaner = LayoffsCleaner::new();

        assert!(!cleaner.clean_all(&source));
    }

    #[test]
    fn test_save_without_cleaning_is_an_error() {
        let dir = tempdir().unwrap();
        let cleaner = LayoffsCleaner::new();

        assert!(cleaner.save_cleaned_data(&dir.path().join("out.csv")).is_err());
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn test_failed_run_discards_previous_state() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("raw.csv");
        fs::write(&source, RAW).unwrap();
        let mut cleaner = LayoffsCleaner::new();
        assert!(cleaner.clean_all(&source));

        assert!(!cleaner.clean_all(&dir.path().join("missing.csv")));
        assert!(cleaner.cleaned_data().is_none());
    }
}
