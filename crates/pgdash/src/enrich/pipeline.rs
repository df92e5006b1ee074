//! Ordered pipeline of derived-column steps.

use serde::{Deserialize, Serialize};

use super::geocode::{Geocoder, DEFAULT_COORDINATES};
use super::score::{ValueScorer, DEFAULT_VALUE_SCALE};
use super::tags::{default_tag_rules, TagRule, Tagger};
use crate::schema::{Coordinates, Derived, EnrichedListing, Listing, ListingTable};

/// One derived column.
///
/// Steps see the normalized listing read-only and write only their own part
/// of [`Derived`], so the result never depends on hidden mutation order.
pub trait EnrichmentStep: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Compute this step's column for one listing.
    fn derive(&self, listing: &Listing, derived: &mut Derived);
}

/// Enrichment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnrichConfig {
    /// Multiplier `k` in `rating² / cost * k`.
    pub value_scale: f64,
    /// Coordinates for locations missing from the lookup table.
    pub default_coordinates: Coordinates,
    /// Comment keyword categories, in check order.
    pub tag_rules: Vec<TagRule>,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            value_scale: DEFAULT_VALUE_SCALE,
            default_coordinates: DEFAULT_COORDINATES,
            tag_rules: default_tag_rules(),
        }
    }
}

/// Runs enrichment steps over normalized listings.
pub struct Enrichment {
    steps: Vec<Box<dyn EnrichmentStep>>,
}

impl Enrichment {
    /// Geocoding, tagging and scoring with default settings.
    pub fn new() -> Self {
        Self::with_config(&EnrichConfig::default())
    }

    /// Geocoding, tagging and scoring configured from `config`.
    pub fn with_config(config: &EnrichConfig) -> Self {
        Self::empty()
            .with_step(Geocoder::with_default(config.default_coordinates))
            .with_step(Tagger::with_rules(config.tag_rules.clone()))
            .with_step(ValueScorer::with_scale(config.value_scale))
    }

    /// A pipeline with no steps.
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step; steps run in insertion order.
    pub fn with_step(mut self, step: impl EnrichmentStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Names of the configured steps, in order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Derive all columns for one listing.
    pub fn enrich(&self, listing: Listing) -> EnrichedListing {
        let mut derived = Derived::default();
        for step in &self.steps {
            step.derive(&listing, &mut derived);
        }
        EnrichedListing { listing, derived }
    }

    /// Enrich every listing and assemble the working table.
    pub fn run(&self, listings: Vec<Listing>, extra_columns: Vec<String>) -> ListingTable {
        tracing::debug!(
            steps = ?self.step_names(),
            listings = listings.len(),
            "running enrichment"
        );
        let listings = listings.into_iter().map(|l| self.enrich(l)).collect();
        ListingTable::new(listings, extra_columns)
    }
}

impl Default for Enrichment {
    fn default() -> Self {
        Self::new()
    }
}
