//! The listing record and its derived fields.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Sentinel for missing location, sharing and type values.
pub const UNKNOWN: &str = "Unknown";
/// Sentinel for a missing contributor gender.
pub const GENDER_NOT_SPECIFIED: &str = "Not Specified";
/// Sentinel for a missing phone number.
pub const PHONE_NOT_AVAILABLE: &str = "N/A";

/// An approximate map position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One normalized accommodation entry.
///
/// Every categorical field carries a sentinel instead of being absent, so
/// grouping and filtering never deal with missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Zero-based row index in the source table.
    pub source_row: usize,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Accommodation category.
    #[serde(rename = "type")]
    pub kind: String,
    /// Area name in title case.
    pub location: String,
    /// Room-sharing arrangement.
    pub sharing: String,
    /// Monthly cost, inside the admissible range.
    pub cost: f64,
    /// Overall rating; zero when unknown.
    pub rating: f64,
    /// Contributor gender.
    pub gender: String,
    /// Free-text comments.
    pub comments: String,
    /// Owner phone number.
    pub phone: String,
    /// Columns with no typed field, keyed by header.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

impl Listing {
    /// A listing with only a location and cost set; everything else defaulted.
    pub fn new(location: impl Into<String>, cost: f64) -> Self {
        Self {
            source_row: 0,
            name: None,
            kind: UNKNOWN.to_string(),
            location: location.into(),
            sharing: UNKNOWN.to_string(),
            cost,
            rating: 0.0,
            gender: GENDER_NOT_SPECIFIED.to_string(),
            comments: String::new(),
            phone: PHONE_NOT_AVAILABLE.to_string(),
            extra: IndexMap::new(),
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_sharing(mut self, sharing: impl Into<String>) -> Self {
        self.sharing = sharing.into();
        self
    }

    /// Display name, falling back to the location.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.location)
    }
}

/// Columns computed from a listing's normalized fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Derived {
    /// Keyword tags, in category-check order.
    pub tags: IndexSet<String>,
    /// Approximate position of the listing's area.
    pub coordinates: Coordinates,
    /// Rating-over-cost ranking metric.
    pub value_score: f64,
}

/// A listing together with its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedListing {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(flatten)]
    pub derived: Derived,
}

impl std::ops::Deref for EnrichedListing {
    type Target = Listing;

    fn deref(&self) -> &Listing {
        &self.listing
    }
}
