//! Enrichment: derived coordinates, comment tags and value scores.

mod geocode;
mod pipeline;
mod score;
mod tags;

pub use geocode::{jitter, lookup_locality, Geocoder, DEFAULT_COORDINATES};
pub use pipeline::{EnrichConfig, Enrichment, EnrichmentStep};
pub use score::{value_score, ValueScorer, DEFAULT_VALUE_SCALE};
pub use tags::{default_tag_rules, tags_for, TagRule, Tagger, GENERIC_TAG};
