use super::{EdaResults, STRONG_CORRELATION};
use crate::common::constants::BANNER_WIDTH;
use chrono::{DateTime, Utc};
use std::fmt;

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

/// Plain-text EDA report; `Display` renders the whole document
pub struct EdaReport<'a> {
    pub source_name: &'a str,
    pub results: &'a EdaResults,
    pub generated_at: DateTime<Utc>,
}

impl EdaReport<'_> {
    fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "-".repeat(BANNER_WIDTH))
    }

    fn overview(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overview = &self.results.overview;
        Self::section(f, "DATASET OVERVIEW")?;
        writeln!(f, "Rows: {}", overview.rows)?;
        writeln!(f, "Columns: {}", overview.columns)?;
        writeln!(f, "Total cells: {}", overview.total_cells)?;
        let missing_pct = if overview.total_cells == 0 {
            0.0
        } else {
            overview.missing_cells as f64 * 100.0 / overview.total_cells as f64
        };
        writeln!(f, "Missing cells: {} ({missing_pct:.2}%)", overview.missing_cells)?;
        writeln!(f, "Duplicate rows: {}", overview.duplicate_rows)
    }

    fn column_profile(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::section(f, "COLUMN PROFILE")?;
        writeln!(
            f,
            "{:<28} {:<8} {:>9} {:>9} {:>9} {:>8}",
            "column", "type", "non-null", "missing", "missing%", "unique"
        )?;
        for column in &self.results.columns {
            writeln!(
                f,
                "{:<28} {:<8} {:>9} {:>9} {:>8.2}% {:>8}",
                column.name,
                column.column_type.to_string(),
                column.non_null,
                column.missing,
                column.missing_pct,
                column.unique
            )?;
        }
        Ok(())
    }

    fn numeric_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::section(f, "NUMERIC SUMMARY")?;
        if self.results.numeric.is_empty() {
            writeln!(f, "No numeric columns.")?;
        }
        for (name, s) in &self.results.numeric {
            writeln!(f, "{name}:")?;
            writeln!(
                f,
                "  count={} mean={:.2} std={} min={:.2} 25%={:.2} 50%={:.2} 75%={:.2} max={:.2}",
                s.count,
                s.mean,
                fmt_opt(s.std_dev),
                s.min,
                s.q1,
                s.median,
                s.q3,
                s.max
            )?;
            writeln!(f, "  IQR outliers: {}", s.outliers)?;
        }
        Ok(())
    }

    fn top_values(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::section(f, "TOP VALUES")?;
        if self.results.top_values.is_empty() {
            writeln!(f, "No text columns.")?;
        }
        for (name, top) in &self.results.top_values {
            writeln!(f, "{name}:")?;
            for (value, count) in top {
                writeln!(f, "  {value}: {count}")?;
            }
        }
        Ok(())
    }

    fn date_ranges(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.results.date_ranges.is_empty() {
            return Ok(());
        }
        Self::section(f, "DATE RANGES")?;
        for range in &self.results.date_ranges {
            let days = (range.latest - range.earliest).num_days();
            writeln!(
                f,
                "{}: {} to {} ({days} days)",
                range.column, range.earliest, range.latest
            )?;
        }
        Ok(())
    }

    fn correlations(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::section(f, "CORRELATIONS")?;
        if self.results.correlations.is_empty() {
            writeln!(f, "Not enough paired numeric data.")?;
        }
        for corr in &self.results.correlations {
            let marker = if corr.coefficient.abs() >= STRONG_CORRELATION {
                "  <- strong"
            } else {
                ""
            };
            writeln!(
                f,
                "{} ~ {}: r={:.3} (n={}){marker}",
                corr.left, corr.right, corr.coefficient, corr.pairs
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for EdaReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(BANNER_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "COMPREHENSIVE EXPLORATORY DATA ANALYSIS REPORT")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Source: {}", self.source_name)?;
        writeln!(
            f,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        self.overview(f)?;
        self.column_profile(f)?;
        self.numeric_summary(f)?;
        self.top_values(f)?;
        self.date_ranges(f)?;
        self.correlations(f)?;

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "END OF REPORT")?;
        writeln!(f, "{rule}")
    }
}

/// Render the full plain-text report
pub fn render(source_name: &str, results: &EdaResults, generated_at: DateTime<Utc>) -> String {
    EdaReport {
        source_name,
        results,
        generated_at,
    }
    .to_string()
}
