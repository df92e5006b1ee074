//! Value score: rewards high ratings super-linearly relative to cost.

use crate::schema::{Derived, Listing};

use super::pipeline::EnrichmentStep;

/// Default scale applied to `rating² / cost`.
pub const DEFAULT_VALUE_SCALE: f64 = 1000.0;

/// `rating² / cost * scale`, or zero when the cost is not positive.
pub fn value_score(rating: f64, cost: f64, scale: f64) -> f64 {
    if cost.is_nan() || cost <= 0.0 || !rating.is_finite() {
        return 0.0;
    }
    rating.powi(2) * scale / cost
}

/// Computes the value score for each listing.
#[derive(Debug, Clone)]
pub struct ValueScorer {
    scale: f64,
}

impl ValueScorer {
    pub fn new() -> Self {
        Self::with_scale(DEFAULT_VALUE_SCALE)
    }

    pub fn with_scale(scale: f64) -> Self {
        Self { scale }
    }
}

impl Default for ValueScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrichmentStep for ValueScorer {
    fn name(&self) -> &'static str {
        "value_score"
    }

    fn derive(&self, listing: &Listing, derived: &mut Derived) {
        derived.value_score = value_score(listing.rating, listing.cost, self.scale);
    }
}
