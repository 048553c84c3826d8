use crate::app::ports::HttpClientPort;
use crate::common::error::{Result, ToolkitError};
use crate::common::types::{CompanyScraper, ScrapeOutcome, ScrapeStats};
use crate::config::ScraperConfig;
use crate::dataset::Dataset;
use crate::infra::http_client::ReqwestHttp;
use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

static FOOTNOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("footnote pattern is valid"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

const PREVIEW_ROWS: usize = 5;

/// Scrapes the largest-companies-by-revenue table and exports it as CSV.
/// The HTTP client is built on first use, so a client that cannot be built is a scrape failure.
pub struct FortuneCompanyScraper {
    http: OnceCell<Box<dyn HttpClientPort>>,
    config: ScraperConfig,
    last_scrape: Option<ScrapeStats>,
}

impl FortuneCompanyScraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            http: OnceCell::new(),
            config,
            last_scrape: None,
        }
    }

    pub fn with_client(config: ScraperConfig, http: Box<dyn HttpClientPort>) -> Self {
        Self {
            http: OnceCell::with_value(http),
            config,
            last_scrape: None,
        }
    }

    fn http(&self) -> Result<&dyn HttpClientPort> {
        let client = self.http.get_or_try_init(|| {
            ReqwestHttp::new(&self.config).map(|http| Box::new(http) as Box<dyn HttpClientPort>)
        })?;
        Ok(client.as_ref())
    }

    #[instrument(skip(self, dest), fields(url = %self.config.url))]
    fn scrape(&self, dest: &Path) -> Result<Option<ScrapeStats>> {
        let response = self.http()?.get(&self.config.url)?;
        if !response.is_success() {
            return Err(ToolkitError::Api {
                message: format!("{} returned status {}", self.config.url, response.status),
            });
        }
        if !response.is_html() {
            return Err(ToolkitError::Api {
                message: format!(
                    "{} returned {} instead of an HTML page",
                    self.config.url, response.content_type
                ),
            });
        }

        let Some(dataset) = parse_company_table(&response.body, self.config.max_rows)? else {
            warn!("No company table with data rows found at {}", self.config.url);
            return Ok(None);
        };

        dataset.to_csv_path(dest)?;
        info!(
            "Scraped {} companies ({} columns) into {}",
            dataset.row_count(),
            dataset.column_count(),
            dest.display()
        );

        Ok(Some(ScrapeStats {
            path: dest.to_path_buf(),
            rows: dataset.row_count(),
            columns: dataset.column_count(),
            preview: dataset
                .rows
                .iter()
                .take(PREVIEW_ROWS)
                .map(|row| row.iter().take(2).cloned().collect::<Vec<_>>().join(" - "))
                .collect(),
        }))
    }
}

impl CompanyScraper for FortuneCompanyScraper {
    fn scrape_and_export(&mut self, dest: &Path) -> ScrapeOutcome {
        match self.scrape(dest) {
            Ok(Some(stats)) => {
                self.last_scrape = Some(stats.clone());
                ScrapeOutcome::Exported(stats)
            }
            Ok(None) => ScrapeOutcome::Empty,
            Err(e) => ScrapeOutcome::Failed(e),
        }
    }

    fn summary(&self) -> Option<String> {
        let stats = self.last_scrape.as_ref()?;
        let mut lines = vec![
            format!("   Companies scraped: {}", stats.rows),
            format!("   Columns: {}", stats.columns),
            format!("   Output: {}", stats.path.display()),
        ];
        if !stats.preview.is_empty() {
            lines.push("   Preview:".to_string());
            for (i, entry) in stats.preview.iter().enumerate() {
                lines.push(format!("     {}. {}", i + 1, entry));
            }
        }
        Some(lines.join("\n"))
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ToolkitError::Parse {
        message: format!("invalid selector '{css}': {e}"),
    })
}

/// Text of a table cell with footnote markers such as `[1]` removed and whitespace collapsed
fn cell_text(cell: ElementRef<'_>) -> String {
    let raw: String = cell.text().collect();
    let without_notes = FOOTNOTE_RE.replace_all(&raw, "");
    WHITESPACE_RE.replace_all(&without_notes, " ").trim().to_string()
}

/// Extract the first `table.wikitable` as a dataset of at most `max_rows` rows.
/// Returns `None` when the page has no such table or the table has no data rows.
/// Row and column spans are not expanded.
pub fn parse_company_table(html: &str, max_rows: usize) -> Result<Option<Dataset>> {
    let document = Html::parse_document(html);
    let table_sel = selector("table.wikitable")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("th, td")?;
    let data_cell_sel = selector("td")?;

    let Some(table) = document.select(&table_sel).next() else {
        return Ok(None);
    };

    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for row in table.select(&row_sel) {
        let cells: Vec<String> = row.select(&cell_sel).map(cell_text).collect();
        let is_header_row = row.select(&data_cell_sel).next().is_none();

        if headers.is_empty() {
            if is_header_row && !cells.is_empty() {
                headers = cells
                    .into_iter()
                    .enumerate()
                    .map(|(i, h)| if h.is_empty() { format!("column_{}", i + 1) } else { h })
                    .collect();
                debug!("Company table headers: {:?}", headers);
            }
            continue;
        }

        if is_header_row || cells.iter().all(String::is_empty) {
            continue;
        }
        rows.push(cells);
        if rows.len() >= max_rows {
            break;
        }
    }

    if headers.is_empty() || rows.is_empty() {
        return Ok(None);
    }
    Ok(Some(Dataset::new(headers, rows)))
}
