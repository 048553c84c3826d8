use crate::common::constants::{NULL_TOKENS, TYPE_INFERENCE_THRESHOLD};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([-+]?)\s*\$?\s*((?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]*)?|\.[0-9]+)\s*%?$",
    )
        .expect("number pattern is valid")
});

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d", "%b %d, %Y", "%B %d, %Y", "%d %B %Y",
];

/// Type a column holds once most of its non-missing cells agree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Date,
    Text,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Date => "date",
            ColumnType::Text => "text",
        };
        f.write_str(name)
    }
}

pub fn is_null(value: &str) -> bool {
    NULL_TOKENS.contains(&value.trim())
}

/// A parsed numeric cell. `integral` is false when the source text had a decimal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub value: f64,
    pub integral: bool,
}

/// Parse a number that may carry a currency sign, thousands separators or a trailing percent.
pub fn parse_number(value: &str) -> Option<Number> {
    let caps = NUMBER_RE.captures(value.trim())?;
    let digits = caps[2].replace(',', "");
    let parsed: f64 = digits.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    let value = if &caps[1] == "-" { -parsed } else { parsed };
    Some(Number {
        value,
        integral: !digits.contains('.'),
    })
}

/// Integral cell as a normalized digit string, so values beyond `f64` precision survive intact.
pub fn parse_integer(value: &str) -> Option<String> {
    let caps = NUMBER_RE.captures(value.trim())?;
    let digits = caps[2].replace(',', "");
    if digits.contains('.') {
        return None;
    }
    let magnitude = digits.trim_start_matches('0');
    if magnitude.is_empty() {
        return Some("0".to_string());
    }
    let sign = if &caps[1] == "-" { "-" } else { "" };
    Some(format!("{sign}{magnitude}"))
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    // Timestamps such as 2023-01-05T10:00:00Z or "2023-01-05 10:00"
    if value.len() > 10 && value.is_char_boundary(10) {
        let (head, tail) = value.split_at(10);
        if tail.starts_with('T') || tail.starts_with(' ') {
            return NaiveDate::parse_from_str(head, "%Y-%m-%d").ok();
        }
    }
    None
}

/// Infer a column type from its cells. Missing cells are ignored; a column with no values is text.
pub fn infer_column_type<'a, I>(cells: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total = 0usize;
    let mut numeric = 0usize;
    let mut all_integral = true;
    let mut dates = 0usize;

    for cell in cells.into_iter().filter(|c| !is_null(c)) {
        total += 1;
        if let Some(number) = parse_number(cell) {
            numeric += 1;
            all_integral &= number.integral;
        } else if parse_date(cell).is_some() {
            dates += 1;
        }
    }

    if total == 0 {
        return ColumnType::Text;
    }
    let share = |count: usize| count as f64 / total as f64;
    if share(numeric) >= TYPE_INFERENCE_THRESHOLD {
        if all_integral {
            ColumnType::Integer
        } else {
            ColumnType::Float
        }
    } else if share(dates) >= TYPE_INFERENCE_THRESHOLD {
        ColumnType::Date
    } else {
        ColumnType::Text
    }
}

/// Rewrite a cell in the canonical form for its column type.
/// Returns `None` when the cell does not parse as that type.
pub fn canonicalize(value: &str, column_type: ColumnType) -> Option<String> {
    match column_type {
        ColumnType::Integer => parse_integer(value),
        ColumnType::Float => parse_number(value).map(|n| format_number(n.value)),
        ColumnType::Date => parse_date(value).map(|d| d.format("%Y-%m-%d").to_string()),
        ColumnType::Text => Some(value.to_string()),
    }
}

/// Shortest decimal form: `1200.0` becomes `1200`, `3.50` becomes `3.5`
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Numeric values of a column, skipping cells that are missing or do not parse
pub fn numeric_values<'a, I>(cells: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    cells
        .into_iter()
        .filter(|c| !is_null(c))
        .filter_map(parse_number)
        .map(|n| n.value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_strips_decorations() {
        assert_eq!(parse_number("1,200").unwrap().value, 1200.0);
        assert_eq!(parse_number("$3.50").unwrap().value, 3.5);
        assert_eq!(parse_number(" 15% ").unwrap().value, 15.0);
        assert_eq!(parse_number("-42").unwrap().value, -42.0);
        assert!(parse_number("1,200").unwrap().integral);
        assert!(!parse_number("0.25").unwrap().integral);
    }

    #[test]
    fn test_parse_number_rejects_text() {
        assert!(parse_number("Seattle").is_none());
        assert!(parse_number("12 apples").is_none());
        assert!(parse_number("").is_none());
        assert!(parse_number("2023-01-05").is_none());
    }

    #[test]
    fn test_parse_number_requires_grouped_thousands() {
        assert!(parse_number("1,2,3").is_none());
        assert!(parse_number("1,2").is_none());
        assert!(parse_number("12,34").is_none());
        assert!(parse_number(",100").is_none());
        assert_eq!(parse_number("1,234,567").unwrap().value, 1_234_567.0);
        assert_eq!(parse_number("1234567").unwrap().value, 1_234_567.0);
        assert_eq!(infer_column_type(["1,2", "3,4", "5,6"]), ColumnType::Text);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 7).unwrap();
        assert_eq!(parse_date("2023-03-07"), Some(expected));
        assert_eq!(parse_date("3/7/2023"), Some(expected));
        assert_eq!(parse_date("2023/03/07"), Some(expected));
        assert_eq!(parse_date("Mar 07, 2023"), Some(expected));
        assert_eq!(parse_date("2023-03-07T10:15:00Z"), Some(expected));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_infer_column_type() {
        assert_eq!(infer_column_type(["1", "2", "NULL", "3"]), ColumnType::Integer);
        assert_eq!(infer_column_type(["1", "2.5", "3"]), ColumnType::Float);
        assert_eq!(infer_column_type(["1/2/2023", "2023-02-03"]), ColumnType::Date);
        assert_eq!(infer_column_type(["Acme", "1", "Globex"]), ColumnType::Text);
        assert_eq!(infer_column_type(["", "NULL"]), ColumnType::Text);
    }

    #[test]
    fn test_type_inference_tolerates_a_minority_of_bad_cells() {
        let cells = ["1", "2", "3", "4", "unknown"];
        assert_eq!(infer_column_type(cells), ColumnType::Integer);
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("1,200", ColumnType::Integer).as_deref(), Some("1200"));
        assert_eq!(canonicalize("$3.50", ColumnType::Float).as_deref(), Some("3.5"));
        assert_eq!(canonicalize("12/25/2022", ColumnType::Date).as_deref(), Some("2022-12-25"));
        assert_eq!(canonicalize("n/a-ish", ColumnType::Integer), None);
    }

    #[test]
    fn test_large_integers_keep_every_digit() {
        assert_eq!(
            canonicalize("9007199254740993", ColumnType::Integer).as_deref(),
            Some("9007199254740993")
        );
        assert_eq!(
            canonicalize("12,345,678,901,234,567,891", ColumnType::Integer).as_deref(),
            Some("12345678901234567891")
        );
        assert_eq!(canonicalize("-$007", ColumnType::Integer).as_deref(), Some("-7"));
        assert_eq!(canonicalize("-0", ColumnType::Integer).as_deref(), Some("0"));
        assert_eq!(canonicalize("15%", ColumnType::Integer).as_deref(), Some("15"));
        assert_eq!(canonicalize("2.5", ColumnType::Integer), None);
    }
}
