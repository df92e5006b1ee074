//! The enriched listing table and its borrowed views.

use serde::{Deserialize, Serialize};

use super::listing::EnrichedListing;

/// The working table produced by one load.
///
/// Immutable once built; filters return [`ListingView`]s over it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingTable {
    /// Listings in source order.
    pub listings: Vec<EnrichedListing>,
    /// Pass-through column names, in source header order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_columns: Vec<String>,
}

impl ListingTable {
    /// Create a table from enriched listings.
    pub fn new(listings: Vec<EnrichedListing>, extra_columns: Vec<String>) -> Self {
        Self {
            listings,
            extra_columns,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the table holds no listings.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Iterate over listings in source order.
    pub fn iter(&self) -> impl Iterator<Item = &EnrichedListing> {
        self.listings.iter()
    }

    /// A view over every listing.
    pub fn view(&self) -> ListingView<'_> {
        ListingView::new(self, self.listings.iter().collect())
    }
}

/// A non-destructive row subset of a [`ListingTable`].
#[derive(Debug, Clone)]
pub struct ListingView<'a> {
    table: &'a ListingTable,
    rows: Vec<&'a EnrichedListing>,
}

impl<'a> ListingView<'a> {
    pub(crate) fn new(table: &'a ListingTable, rows: Vec<&'a EnrichedListing>) -> Self {
        Self { table, rows }
    }

    /// The table this view projects.
    pub fn table(&self) -> &'a ListingTable {
        self.table
    }

    /// Number of rows in the view.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Number of rows in the underlying table.
    pub fn total(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows of the view.
    pub fn iter(&self) -> impl Iterator<Item = &'a EnrichedListing> + '_ {
        self.rows.iter().copied()
    }

    /// Rows with the highest value score first, at most `n` of them.
    ///
    /// Ties keep source order.
    pub fn top_by_value(&self, n: usize) -> Vec<&'a EnrichedListing> {
        let mut ranked = self.rows.clone();
        ranked.sort_by(|a, b| b.derived.value_score.total_cmp(&a.derived.value_score));
        ranked.truncate(n);
        ranked
    }
}
