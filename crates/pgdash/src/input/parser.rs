//! CSV/TSV parser with delimiter detection.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{PgDashError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Records sampled when detecting the delimiter.
const SNIFF_RECORDS: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses delimited listing data.
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse raw source bytes and return the data table and metadata.
    pub fn parse(&self, bytes: &[u8], source: &str) -> Result<(DataTable, SourceMetadata)> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes, self.config.quote)?,
        };

        let table = self.parse_bytes(bytes, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata::new(
            source.to_string(),
            hash,
            bytes.len() as u64,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse bytes with a known delimiter.
    ///
    /// Cells are decoded lossily so a stray invalid byte only garbles its own cell.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(PgDashError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in reader.byte_records() {
            if self.config.max_rows.is_some_and(|max| rows.len() >= max) {
                break;
            }

            let record = result?;
            let mut row: Vec<String> = record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect();

            // Blank trailing lines from spreadsheet exports
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }

            row.resize(expected_cols, String::new());
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(PgDashError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the delimiter that splits the leading records into the most columns.
///
/// Each candidate is tried with the csv reader itself, so quoted separators
/// and multi-line cells count correctly. A width that holds across every
/// sampled record beats a wider but ragged one; ties go to the earlier
/// candidate.
fn detect_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(PgDashError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best: Option<(u8, bool, usize)> = None;

    for &delim in DELIMITERS {
        let widths: Vec<usize> = csv::ReaderBuilder::new()
            .delimiter(delim)
            .quote(quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .byte_records()
            .take(SNIFF_RECORDS)
            .map_while(|record| record.ok())
            .map(|record| record.len())
            .collect();

        let Some(&header_width) = widths.first() else {
            continue;
        };
        if header_width < 2 {
            continue;
        }
        let consistent = widths.iter().all(|&w| w == header_width);

        let better = match best {
            None => true,
            Some((_, best_consistent, best_width)) => {
                (consistent, header_width) > (best_consistent, best_width)
            }
        };
        if better {
            best = Some((delim, consistent, header_width));
        }
    }

    Ok(best.map_or(b',', |(delim, _, _)| delim))
}
