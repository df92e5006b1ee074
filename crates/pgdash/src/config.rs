//! Dashboard configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::enrich::EnrichConfig;
use crate::error::{PgDashError, Result};
use crate::input::{ParserConfig, DEFAULT_TIMEOUT_SECS};
use crate::normalize::{CostRange, NormalizeConfig};

/// Configuration for a [`Dashboard`](crate::Dashboard).
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Normalization configuration.
    pub normalize: NormalizeConfig,
    /// Enrichment configuration.
    pub enrich: EnrichConfig,
    /// How long fetched source bytes are reused; zero disables caching.
    pub cache_ttl_secs: u64,
    /// Timeout for remote sources.
    pub request_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            normalize: NormalizeConfig::default(),
            enrich: EnrichConfig::default(),
            cache_ttl_secs: 600,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DashboardConfig {
    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| PgDashError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        let range = self.normalize.cost_range;
        if !(range.min.is_finite() && range.max.is_finite()) || range.min <= 0.0 {
            return Err(PgDashError::Config(
                "cost_range bounds must be finite and min must be positive".to_string(),
            ));
        }
        if range.min > range.max {
            return Err(PgDashError::Config(format!(
                "cost_range min ({}) exceeds max ({})",
                range.min, range.max
            )));
        }
        if !(self.normalize.rating_scale.is_finite() && self.normalize.rating_scale > 0.0) {
            return Err(PgDashError::Config(
                "rating_scale must be a positive number".to_string(),
            ));
        }
        if !self.enrich.value_scale.is_finite() {
            return Err(PgDashError::Config(
                "value_scale must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the admissible cost range.
    pub fn with_cost_range(mut self, min: f64, max: f64) -> Self {
        self.normalize.cost_range = CostRange::new(min, max);
        self
    }

    /// Set the cache time-to-live.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = ttl.as_secs();
        self
    }

    /// Set the value score multiplier.
    pub fn with_value_scale(mut self, scale: f64) -> Self {
        self.enrich.value_scale = scale;
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
