//! Sidebar-style filters over the listing table.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::schema::{EnrichedListing, ListingTable, ListingView};

/// Inclusive numeric bounds; either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Filter predicates applied to a table.
///
/// Text fields use exact equality against a set of allowed values; a `None`
/// set allows everything. Numeric fields use inclusive bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genders: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<BTreeSet<String>>,
    #[serde(default)]
    pub cost: Bounds,
    #[serde(default)]
    pub rating: Bounds,
}

impl ListingFilter {
    /// A filter that keeps every row.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations = Some(locations.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_genders<I, S>(mut self, genders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genders = Some(genders.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_cost(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.cost = Bounds::new(min, max);
        self
    }

    pub fn with_rating(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.rating = Bounds::new(min, max);
        self
    }

    /// Whether a listing passes every predicate.
    pub fn matches(&self, listing: &EnrichedListing) -> bool {
        allowed(&self.locations, &listing.location)
            && allowed(&self.genders, &listing.gender)
            && allowed(&self.types, &listing.kind)
            && self.cost.contains(listing.cost)
            && self.rating.contains(listing.rating)
    }

    /// Project the rows of `table` that pass the filter.
    pub fn apply<'a>(&self, table: &'a ListingTable) -> ListingView<'a> {
        let rows = table.iter().filter(|l| self.matches(l)).collect();
        ListingView::new(table, rows)
    }
}

fn allowed(set: &Option<BTreeSet<String>>, value: &str) -> bool {
    set.as_ref().is_none_or(|s| s.contains(value))
}

impl ListingTable {
    /// Rows passing `filter`, without touching the table.
    pub fn filter(&self, filter: &ListingFilter) -> ListingView<'_> {
        filter.apply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::Enrichment;
    use crate::schema::Listing;

    fn table() -> ListingTable {
        let listings = vec![
            Listing::new("Gachibowli", 6000.0)
                .with_rating(4.0)
                .with_gender("Male")
                .with_kind("PG"),
            Listing::new("Madhapur", 9000.0)
                .with_rating(3.0)
                .with_gender("Female")
                .with_kind("Hostel"),
            Listing::new("Ameerpet", 4500.0)
                .with_rating(0.0)
                .with_gender("Male")
                .with_kind("PG"),
        ];
        Enrichment::new().run(listings, Vec::new())
    }

    fn locations(view: &ListingView<'_>) -> Vec<String> {
        view.iter().map(|l| l.location.clone()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let table = table();
        let view = table.filter(&ListingFilter::new());
        assert_eq!(view.len(), 3);
        assert_eq!(view.total(), 3);
    }

    #[test]
    fn test_categorical_filters_use_exact_equality() {
        let table = table();
        let view = table.filter(&ListingFilter::new().with_genders(["Male"]));
        assert_eq!(locations(&view), vec!["Gachibowli", "Ameerpet"]);

        let view = table.filter(&ListingFilter::new().with_locations(["gachibowli"]));
        assert!(view.is_empty());
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let table = table();
        let view = table.filter(&ListingFilter::new().with_cost(Some(4500.0), Some(6000.0)));
        assert_eq!(locations(&view), vec!["Gachibowli", "Ameerpet"]);

        let view = table.filter(&ListingFilter::new().with_rating(Some(3.0), None));
        assert_eq!(locations(&view), vec!["Gachibowli", "Madhapur"]);
    }

    #[test]
    fn test_filters_combine() {
        let table = table();
        let filter = ListingFilter::new()
            .with_types(["PG"])
            .with_rating(Some(1.0), Some(5.0));
        assert_eq!(locations(&table.filter(&filter)), vec!["Gachibowli"]);
    }

    #[test]
    fn test_empty_allowed_set_matches_nothing() {
        let table = table();
        let filter = ListingFilter::new().with_locations(Vec::<String>::new());
        assert!(table.filter(&filter).is_empty());
        assert_eq!(table.len(), 3);
    }
}
