//! Normalization of a raw table into typed listings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::coerce::{parse_rating, title_case};
use super::currency::{parse_cost, CostParse};
use crate::error::{PgDashError, Result};
use crate::input::DataTable;
use crate::schema::{
    canonical_header, col, Listing, CANONICAL_COLUMNS, GENDER_NOT_SPECIFIED, PHONE_NOT_AVAILABLE,
    UNKNOWN,
};

/// Inclusive bounds for admissible monthly costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl CostRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `cost` lies inside the range.
    pub fn contains(&self, cost: f64) -> bool {
        cost >= self.min && cost <= self.max
    }
}

impl Default for CostRange {
    fn default() -> Self {
        Self {
            min: 1000.0,
            max: 50000.0,
        }
    }
}

/// Normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Rows with a cost outside this range are dropped.
    pub cost_range: CostRange,
    /// Upper end of the rating scale.
    pub rating_scale: f64,
    /// Columns removed when present.
    pub drop_columns: Vec<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            cost_range: CostRange::default(),
            rating_scale: 5.0,
            drop_columns: vec![col::TIMESTAMP.to_string()],
        }
    }
}

/// A row removed because its cost was inadmissible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedRow {
    /// Zero-based row index in the source table.
    pub source_row: usize,
    /// The cost cell as it appeared in the source.
    pub raw_cost: String,
    /// The parsed cost (zero when unparseable).
    pub cost: f64,
}

/// What normalization did to a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeReport {
    /// Data rows in the raw table.
    pub rows_read: usize,
    /// Rows that made it into the working set.
    pub rows_kept: usize,
    /// Rows dropped for an inadmissible cost.
    pub excluded: Vec<ExcludedRow>,
    /// Cost cells that were missing or unparseable.
    pub costs_defaulted: usize,
    /// Cost cells given as a range and reduced to the midpoint.
    pub cost_ranges_averaged: usize,
    /// Rating cells that were missing or unusable.
    pub ratings_defaulted: usize,
    /// `(raw header, canonical name)` pairs that were renamed.
    pub renamed_columns: Vec<(String, String)>,
    /// Columns removed from the table.
    pub dropped_columns: Vec<String>,
}

/// Output of [`Normalizer::normalize`].
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub listings: Vec<Listing>,
    /// Pass-through column names, in header order.
    pub extra_columns: Vec<String>,
    pub report: NormalizeReport,
}

/// Maps raw survey tables onto the listing schema.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    /// Create a normalizer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with custom configuration.
    pub fn with_config(config: NormalizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Normalize a raw table.
    ///
    /// Only a missing cost column is fatal; every cell-level problem resolves
    /// to a default and is counted in the report.
    pub fn normalize(&self, table: &DataTable) -> Result<NormalizedTable> {
        let mut report = NormalizeReport {
            rows_read: table.row_count(),
            ..NormalizeReport::default()
        };

        // First occurrence of each header wins
        let mut columns: IndexMap<String, usize> = IndexMap::new();
        for (idx, raw) in table.headers.iter().enumerate() {
            let name = canonical_header(raw);
            if name != raw.trim() {
                report.renamed_columns.push((raw.trim().to_string(), name.clone()));
            }
            if self.config.drop_columns.iter().any(|d| *d == name) {
                if !report.dropped_columns.contains(&name) {
                    report.dropped_columns.push(name);
                }
                continue;
            }
            columns.entry(name).or_insert(idx);
        }

        if !columns.contains_key(col::COST) {
            return Err(PgDashError::MissingColumn(col::COST.to_string()));
        }

        let extra_columns: Vec<String> = columns
            .keys()
            .filter(|name| !name.is_empty() && !CANONICAL_COLUMNS.contains(&name.as_str()))
            .cloned()
            .collect();

        let mut listings = Vec::with_capacity(table.row_count());

        for (row_idx, row) in table.rows.iter().enumerate() {
            let cells = RowCells {
                columns: &columns,
                row,
            };

            let parsed_cost = cells
                .get(col::COST)
                .map(parse_cost)
                .unwrap_or(CostParse::Invalid);
            match parsed_cost {
                CostParse::Invalid => report.costs_defaulted += 1,
                CostParse::Range { .. } => report.cost_ranges_averaged += 1,
                CostParse::Value { .. } => {}
            }
            let cost = parsed_cost.amount();

            if !self.config.cost_range.contains(cost) {
                tracing::debug!(row = row_idx, cost, "excluding row with inadmissible cost");
                report.excluded.push(ExcludedRow {
                    source_row: row_idx,
                    raw_cost: cells.raw(col::COST).unwrap_or_default().to_string(),
                    cost,
                });
                continue;
            }

            let rating = match cells
                .get(col::RATING)
                .and_then(|r| parse_rating(r, self.config.rating_scale))
            {
                Some(r) => r,
                None => {
                    report.ratings_defaulted += 1;
                    0.0
                }
            };

            let location = cells
                .get(col::LOCATION)
                .map(title_case)
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string());

            let extra = extra_columns
                .iter()
                .map(|name| {
                    let value = cells.raw(name).map(str::trim).unwrap_or_default();
                    (name.clone(), value.to_string())
                })
                .collect();

            listings.push(Listing {
                source_row: row_idx,
                name: cells.get(col::NAME).map(str::to_string),
                kind: text_or(cells.get(col::TYPE), UNKNOWN),
                location,
                sharing: text_or(cells.get(col::SHARING), UNKNOWN),
                cost,
                rating,
                gender: text_or(cells.get(col::GENDER), GENDER_NOT_SPECIFIED),
                comments: text_or(cells.get(col::COMMENTS), ""),
                phone: text_or(cells.get(col::PHONE), PHONE_NOT_AVAILABLE),
                extra,
            });
        }

        report.rows_kept = listings.len();

        if !report.excluded.is_empty() {
            tracing::warn!(
                excluded = report.excluded.len(),
                min = self.config.cost_range.min,
                max = self.config.cost_range.max,
                "dropped rows with cost outside the admissible range"
            );
        }
        tracing::debug!(
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            costs_defaulted = report.costs_defaulted,
            ratings_defaulted = report.ratings_defaulted,
            "normalized table"
        );

        Ok(NormalizedTable {
            listings,
            extra_columns,
            report,
        })
    }
}

/// Column lookup for one raw row.
struct RowCells<'a> {
    columns: &'a IndexMap<String, usize>,
    row: &'a [String],
}

impl<'a> RowCells<'a> {
    /// The cell as written, if the column exists.
    fn raw(&self, name: &str) -> Option<&'a str> {
        let idx = *self.columns.get(name)?;
        self.row.get(idx).map(String::as_str)
    }

    /// The trimmed cell, or `None` when missing or null-like.
    fn get(&self, name: &str) -> Option<&'a str> {
        self.raw(name)
            .map(str::trim)
            .filter(|v| !DataTable::is_null_value(v))
    }
}

fn text_or(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_string()
}
