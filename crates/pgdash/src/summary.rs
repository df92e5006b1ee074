//! Aggregates the dashboard charts and sidebar are built from.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{EnrichedListing, ListingTable, ListingView};

/// Values available to each sidebar filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Distinct locations, sorted.
    pub locations: Vec<String>,
    /// Distinct genders, sorted.
    pub genders: Vec<String>,
    /// Distinct accommodation types, sorted.
    pub types: Vec<String>,
    /// Lowest and highest cost, if the table has rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_bounds: Option<(f64, f64)>,
}

impl FilterOptions {
    /// Collect filter options from the full table.
    pub fn from_table(table: &ListingTable) -> Self {
        let cost_bounds = table.iter().map(|l| l.cost).fold(None, |acc, cost| match acc {
            None => Some((cost, cost)),
            Some((lo, hi)) => Some((f64::min(lo, cost), f64::max(hi, cost))),
        });

        Self {
            locations: distinct(table, |l| l.location.as_str()),
            genders: distinct(table, |l| l.gender.as_str()),
            types: distinct(table, |l| l.kind.as_str()),
            cost_bounds,
        }
    }
}

/// One point of the rating-vs-cost scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPoint {
    pub cost: f64,
    pub rating: f64,
    pub sharing: String,
}

/// Chart data for a filtered view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Rows in the view.
    pub displayed: usize,
    /// Rows in the underlying table.
    pub total: usize,
    /// Mean cost per location, rounded, highest first.
    pub avg_cost_by_location: IndexMap<String, f64>,
    /// Mean cost per sharing type, rounded, highest first.
    pub avg_cost_by_sharing: IndexMap<String, f64>,
    /// Listings per location, most first.
    pub count_by_location: IndexMap<String, usize>,
    /// Rating against cost for every row.
    pub rating_vs_cost: Vec<RatingPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_rating: Option<f64>,
}

impl Summary {
    /// Summarize a view. An empty view gives empty aggregates.
    pub fn from_view(view: &ListingView<'_>) -> Self {
        let rows: Vec<&EnrichedListing> = view.iter().collect();
        let n = rows.len();

        Self {
            displayed: n,
            total: view.total(),
            avg_cost_by_location: average_cost_by(&rows, |l| l.location.as_str()),
            avg_cost_by_sharing: average_cost_by(&rows, |l| l.sharing.as_str()),
            count_by_location: count_by(&rows, |l| l.location.as_str()),
            rating_vs_cost: rows
                .iter()
                .map(|l| RatingPoint {
                    cost: l.cost,
                    rating: l.rating,
                    sharing: l.sharing.clone(),
                })
                .collect(),
            mean_cost: mean_of(&rows, |l| l.cost),
            mean_rating: mean_of(&rows, |l| l.rating),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.displayed == 0
    }
}

fn distinct(table: &ListingTable, field: fn(&EnrichedListing) -> &str) -> Vec<String> {
    table
        .iter()
        .map(field)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn mean_of(rows: &[&EnrichedListing], field: fn(&EnrichedListing) -> f64) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    Some(rows.iter().map(|l| field(l)).sum::<f64>() / rows.len() as f64)
}

fn average_cost_by(
    rows: &[&EnrichedListing],
    key: fn(&EnrichedListing) -> &str,
) -> IndexMap<String, f64> {
    let mut sums: IndexMap<&str, (f64, usize)> = IndexMap::new();
    for row in rows {
        let entry = sums.entry(key(row)).or_insert((0.0, 0));
        entry.0 += row.cost;
        entry.1 += 1;
    }

    let mut averages: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(k, (sum, count))| (k.to_string(), (sum / count as f64).round()))
        .collect();
    averages.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    averages.into_iter().collect()
}

fn count_by(
    rows: &[&EnrichedListing],
    key: fn(&EnrichedListing) -> &str,
) -> IndexMap<String, usize> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for row in rows {
        *counts.entry(key(row)).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, c)| (k.to_string(), c))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::Enrichment;
    use crate::filter::ListingFilter;
    use crate::schema::Listing;

    fn table() -> ListingTable {
        let listings = vec![
            Listing::new("Gachibowli", 6000.0)
                .with_rating(4.0)
                .with_sharing("Double")
                .with_gender("Male"),
            Listing::new("Gachibowli", 7001.0)
                .with_rating(2.0)
                .with_sharing("Single")
                .with_gender("Female"),
            Listing::new("Ameerpet", 9000.0)
                .with_rating(3.0)
                .with_sharing("Double")
                .with_gender("Male"),
        ];
        Enrichment::new().run(listings, Vec::new())
    }

    #[test]
    fn test_filter_options() {
        let options = FilterOptions::from_table(&table());
        assert_eq!(options.locations, vec!["Ameerpet", "Gachibowli"]);
        assert_eq!(options.genders, vec!["Female", "Male"]);
        assert_eq!(options.types, vec!["Unknown"]);
        assert_eq!(options.cost_bounds, Some((6000.0, 9000.0)));
    }

    #[test]
    fn test_filter_options_empty_table() {
        let options = FilterOptions::from_table(&ListingTable::default());
        assert!(options.locations.is_empty());
        assert_eq!(options.cost_bounds, None);
    }

    #[test]
    fn test_average_cost_sorted_descending() {
        let table = table();
        let summary = Summary::from_view(&table.view());

        let by_location: Vec<_> = summary.avg_cost_by_location.into_iter().collect();
        assert_eq!(
            by_location,
            vec![("Ameerpet".to_string(), 9000.0), ("Gachibowli".to_string(), 6501.0)]
        );

        let by_sharing: Vec<_> = summary.avg_cost_by_sharing.into_iter().collect();
        assert_eq!(
            by_sharing,
            vec![("Double".to_string(), 7500.0), ("Single".to_string(), 7001.0)]
        );
    }

    #[test]
    fn test_counts_and_means() {
        let table = table();
        let summary = Summary::from_view(&table.view());

        assert_eq!(summary.count_by_location.get("Gachibowli"), Some(&2));
        assert_eq!(
            summary.count_by_location.first(),
            Some((&"Gachibowli".to_string(), &2))
        );
        assert_eq!(summary.mean_rating, Some(3.0));
        assert_eq!(summary.rating_vs_cost.len(), 3);
        assert_eq!(summary.displayed, 3);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn test_empty_view_summary() {
        let table = table();
        let view = table.filter(&ListingFilter::new().with_locations(["Uppal"]));
        let summary = Summary::from_view(&view);

        assert!(summary.is_empty());
        assert_eq!(summary.total, 3);
        assert!(summary.avg_cost_by_location.is_empty());
        assert_eq!(summary.mean_cost, None);
    }
}
