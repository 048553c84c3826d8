//! Individual cleaning passes. Each one mutates the dataset in place and returns what it changed.

use crate::dataset::values::{self, ColumnType};
use crate::dataset::Dataset;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NON_ALNUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("header pattern is valid"));

/// Normalize header names to snake_case. Returns `(old, new)` for every header that changed.
pub fn normalize_headers(dataset: &mut Dataset) -> Vec<(String, String)> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut renamed = Vec::new();

    for (i, header) in dataset.headers.iter_mut().enumerate() {
        let lowered = header.trim().to_lowercase();
        let base = NON_ALNUM_RE.replace_all(&lowered, "_").trim_matches('_').to_string();
        let base = if base.is_empty() {
            format!("column_{}", i + 1)
        } else {
            base
        };

        let mut candidate = base.clone();
        let mut suffix = 2;
        while seen.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());

        if *header != candidate {
            renamed.push((header.clone(), candidate.clone()));
            *header = candidate;
        }
    }
    renamed
}

/// Trim surrounding whitespace from every cell. Returns the number of cells changed.
pub fn trim_cells(dataset: &mut Dataset) -> usize {
    let mut changed = 0;
    for cell in dataset.rows.iter_mut().flatten() {
        let trimmed = cell.trim();
        if trimmed.len() != cell.len() {
            *cell = trimmed.to_string();
            changed += 1;
        }
    }
    changed
}

/// Replace null markers such as `NULL` or `N/A` with an empty cell.
/// Cells that are already empty are not counted.
pub fn normalize_nulls(dataset: &mut Dataset) -> usize {
    let mut changed = 0;
    for cell in dataset.rows.iter_mut().flatten() {
        if !cell.is_empty() && values::is_null(cell) {
            cell.clear();
            changed += 1;
        }
    }
    changed
}

pub fn drop_blank_rows(dataset: &mut Dataset) -> usize {
    let before = dataset.rows.len();
    dataset.rows.retain(|row| row.iter().any(|cell| !cell.is_empty()));
    before - dataset.rows.len()
}

/// Remove exact duplicate rows, keeping the first occurrence and the original order.
pub fn drop_duplicates(dataset: &mut Dataset) -> usize {
    let before = dataset.rows.len();
    let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(before);
    dataset.rows.retain(|row| seen.insert(row.clone()));
    before - dataset.rows.len()
}

pub fn infer_types(dataset: &Dataset) -> Vec<ColumnType> {
    (0..dataset.column_count())
        .map(|i| values::infer_column_type(dataset.column(i)))
        .collect()
}

/// Rewrite typed columns canonically. Cells that do not parse as their column type are emptied.
/// Returns the number of coerced cells.
pub fn fix_types(dataset: &mut Dataset, column_types: &[ColumnType]) -> usize {
    let mut coerced = 0;
    for row in dataset.rows.iter_mut() {
        for (cell, column_type) in row.iter_mut().zip(column_types) {
            if cell.is_empty() || *column_type == ColumnType::Text {
                continue;
            }
            match values::canonicalize(cell, *column_type) {
                Some(canonical) => *cell = canonical,
                None => {
                    cell.clear();
                    coerced += 1;
                }
            }
        }
    }
    coerced
}

/// Missing cells per column after cleaning
pub fn missing_per_column(dataset: &Dataset) -> Vec<usize> {
    (0..dataset.column_count())
        .map(|i| dataset.column(i).filter(|c| c.is_empty()).count())
        .collect()
}
