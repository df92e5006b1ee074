//! Main Dashboard struct and public API.

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::enrich::Enrichment;
use crate::error::Result;
use crate::input::{DataSource, DefaultFetcher, Parser, SourceCache, SourceFetcher, SourceMetadata};
use crate::normalize::{NormalizeReport, Normalizer};
use crate::schema::ListingTable;

/// Result of loading a source.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedData {
    /// Metadata about the raw source.
    pub source: SourceMetadata,
    /// The enriched working table.
    pub table: ListingTable,
    /// What normalization changed or dropped.
    pub report: NormalizeReport,
}

/// Loads, cleans and enriches listing data.
///
/// One `load` is one page render: fetch (or reuse cached bytes), parse,
/// normalize, enrich. Any failure before normalization completes aborts the
/// load with no partial table.
pub struct Dashboard {
    config: DashboardConfig,
    fetcher: Box<dyn SourceFetcher>,
    cache: SourceCache,
    parser: Parser,
    normalizer: Normalizer,
    enrichment: Enrichment,
}

impl Dashboard {
    /// Create a dashboard with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(DashboardConfig::default())
    }

    /// Create a dashboard with custom configuration and the default fetcher.
    pub fn with_config(config: DashboardConfig) -> Result<Self> {
        let fetcher = DefaultFetcher::with_timeout(config.request_timeout())?;
        Self::with_fetcher(config, fetcher)
    }

    /// Create a dashboard that fetches through `fetcher`.
    pub fn with_fetcher(
        config: DashboardConfig,
        fetcher: impl SourceFetcher + 'static,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cache: SourceCache::new(config.cache_ttl()),
            parser: Parser::with_config(config.parser.clone()),
            normalizer: Normalizer::with_config(config.normalize.clone()),
            enrichment: Enrichment::with_config(&config.enrich),
            fetcher: Box::new(fetcher),
            config,
        })
    }

    /// Replace the enrichment pipeline.
    pub fn with_enrichment(mut self, enrichment: Enrichment) -> Self {
        self.enrichment = enrichment;
        self
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Load a source into an enriched table.
    pub fn load(&self, source: &DataSource) -> Result<LoadedData> {
        let key = source.key();
        tracing::info!(source = %key, "loading listings");

        let bytes = match self.cache.get(&key) {
            Some(bytes) => {
                tracing::info!(source = %key, "using cached source");
                bytes
            }
            None => {
                let fetched = self.fetcher.fetch(source)?;
                self.cache.insert(key.clone(), fetched)
            }
        };

        self.load_bytes(&bytes, &key)
    }

    /// Run the pipeline over bytes already in memory.
    pub fn load_bytes(&self, bytes: &[u8], source: &str) -> Result<LoadedData> {
        let (raw, metadata) = self.parser.parse(bytes, source)?;
        tracing::debug!(
            rows = metadata.row_count,
            columns = metadata.column_count,
            format = %metadata.format,
            "parsed source"
        );

        let normalized = self.normalizer.normalize(&raw)?;
        let table = self
            .enrichment
            .run(normalized.listings, normalized.extra_columns);

        tracing::info!(
            source,
            rows_read = normalized.report.rows_read,
            listings = table.len(),
            excluded = normalized.report.excluded.len(),
            "loaded listings"
        );

        Ok(LoadedData {
            source: metadata,
            table,
            report: normalized.report,
        })
    }
}
