//! Source fetching, caching and parsing.

mod cache;
mod fetch;
mod parser;
mod source;

pub use cache::SourceCache;
pub use fetch::{DefaultFetcher, SourceFetcher, DEFAULT_TIMEOUT_SECS};
pub use parser::{Parser, ParserConfig};
pub use source::{sheets_export_url, DataSource, DataTable, SourceMetadata};
