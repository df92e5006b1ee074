//! pgdash: ingestion and enrichment of crowd-sourced PG/hostel listings.
//!
//! A load fetches a delimited-text source (local file or live spreadsheet),
//! maps its decorated survey headers onto a fixed schema, coerces and
//! defaults every cell, drops rows with implausible costs, and derives
//! coordinates, comment tags and a value score for each listing.
//!
//! # Core Principles
//!
//! - **Whole-or-nothing loads**: a source that cannot be fetched or parsed is an error, never a partial table
//! - **Local fallbacks**: a bad cell becomes a documented default, never an error
//! - **Non-destructive views**: filters borrow rows of an immutable table
//!
//! # Example
//!
//! ```no_run
//! use pgdash::{Dashboard, DataSource, ListingFilter, Summary};
//!
//! let dashboard = Dashboard::new().unwrap();
//! let loaded = dashboard.load(&DataSource::parse("pg_data.csv").unwrap()).unwrap();
//!
//! let filter = ListingFilter::new().with_cost(Some(4000.0), Some(9000.0));
//! let view = loaded.table.filter(&filter);
//! let summary = Summary::from_view(&view);
//!
//! println!("Displaying {} of {}", summary.displayed, summary.total);
//! ```

pub mod config;
pub mod enrich;
pub mod error;
pub mod export;
pub mod filter;
pub mod input;
pub mod normalize;
pub mod schema;
pub mod summary;

mod dashboard;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, LoadedData};
pub use enrich::{EnrichConfig, Enrichment, EnrichmentStep, TagRule};
pub use error::{PgDashError, Result};
pub use filter::{Bounds, ListingFilter};
pub use input::{DataSource, SourceFetcher, SourceMetadata};
pub use normalize::{CostRange, NormalizeReport};
pub use schema::{Coordinates, Derived, EnrichedListing, Listing, ListingTable, ListingView};
pub use summary::{FilterOptions, RatingPoint, Summary};
