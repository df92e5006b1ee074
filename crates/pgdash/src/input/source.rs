//! Data sources, raw tables and source metadata.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PgDashError, Result};

/// Google Sheets document URL with an optional `gid` fragment or query.
static SHEETS_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://docs\.google\.com/spreadsheets/d/([A-Za-z0-9_-]+)(?:/[^?#]*)?(?:[?#].*?gid=(\d+))?")
        .expect("valid sheets regex")
});

/// Where listing data comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum DataSource {
    /// A local delimited-text file.
    File(PathBuf),
    /// A URL returning delimited text.
    Url(String),
}

impl DataSource {
    /// Interpret a user-supplied string as a file path or URL.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PgDashError::InvalidSource("empty source".to_string()));
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(DataSource::Url(trimmed.to_string()))
        } else if lower.contains("://") {
            Err(PgDashError::InvalidSource(format!(
                "unsupported scheme in '{}'",
                trimmed
            )))
        } else {
            Ok(DataSource::File(PathBuf::from(trimmed)))
        }
    }

    /// Key used for caching and reporting.
    pub fn key(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Url(url) => url.clone(),
        }
    }

    /// The URL to actually request, rewriting spreadsheet links to their CSV export.
    ///
    /// Returns `None` for file sources.
    pub fn fetch_url(&self) -> Option<String> {
        match self {
            DataSource::File(_) => None,
            DataSource::Url(url) => Some(sheets_export_url(url).unwrap_or_else(|| url.clone())),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Rewrite a Google Sheets edit/view URL to its CSV export endpoint.
///
/// URLs that already point at an export are left alone.
pub fn sheets_export_url(url: &str) -> Option<String> {
    if url.contains("/export?") || url.contains("/pub?") {
        return None;
    }
    let caps = SHEETS_URL.captures(url)?;
    let id = caps.get(1)?.as_str();
    let gid = caps.get(2).map(|m| m.as_str()).unwrap_or("0");
    Some(format!(
        "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
        id, gid
    ))
}

/// Metadata about a loaded source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Source key (path or URL).
    pub source: String,
    /// SHA-256 hash of the raw bytes.
    pub hash: String,
    /// Size of the raw bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the source was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a source that has been parsed.
    pub fn new(
        source: String,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            source,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Parsed tabular data before normalization.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers, exactly as they appeared in the source.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }
}
