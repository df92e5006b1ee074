//! Listing schema: canonical columns, records and tables.

mod columns;
mod listing;
mod table;

pub use columns::{canonical_header, col, CANONICAL_COLUMNS, COLUMN_RENAMES};
pub use listing::{
    Coordinates, Derived, EnrichedListing, Listing, GENDER_NOT_SPECIFIED, PHONE_NOT_AVAILABLE,
    UNKNOWN,
};
pub use table::{ListingTable, ListingView};
