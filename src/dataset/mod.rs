//! In-memory tabular data shared by the scraper, the cleaner and the EDA engine.
//!
//! Cells are kept as strings exactly as they appear on disk; typed views are derived on demand
//! through [`values`].

pub mod values;

use crate::common::error::{Result, ToolkitError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A CSV file held in memory: one header row and any number of data rows.
/// Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows.into_iter().map(|row| fit_width(row, width)).collect();
        Self { headers, rows }
    }

    /// Read a CSV file. Ragged rows are padded or truncated to the header width.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ToolkitError::EmptyDataset(format!(
                "{} has no header row",
                path.display()
            )));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Vec<String> = record.iter().map(str::to_string).collect();
            rows.push(fit_width(row, headers.len()));
        }

        debug!(
            "Loaded {} rows x {} columns from {}",
            rows.len(),
            headers.len(),
            path.display()
        );
        Ok(Self { headers, rows })
    }

    /// Write the dataset as CSV, creating parent directories and overwriting any existing file.
    pub fn to_csv_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        debug!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All cells of one column, top to bottom
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

fn fit_width(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}
