//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pgdash::ListingFilter;

/// pgdash: browse crowd-sourced PG/hostel listings
#[derive(Parser)]
#[command(name = "pgdash")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the listings that match the filters
    Show {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show filter options and chart aggregates
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank listings by value score
    Top {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Number of listings to show
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// Write the enriched listings to a file
    Export {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// Spread coordinates by up to this many degrees
        #[arg(long, value_name = "DEGREES")]
        jitter: Option<f64>,

        /// Seed for coordinate jitter
        #[arg(long, default_value = "42", requires = "jitter")]
        seed: u64,
    },
}

/// Where to load listings from.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Path or URL of the listings sheet (CSV/TSV or a spreadsheet link)
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Sidebar filters.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Keep only these locations (repeatable)
    #[arg(long = "location", value_name = "LOCATION")]
    pub locations: Vec<String>,

    /// Keep only these genders (repeatable)
    #[arg(long = "gender", value_name = "GENDER")]
    pub genders: Vec<String>,

    /// Keep only these accommodation types (repeatable)
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Minimum monthly cost
    #[arg(long)]
    pub min_cost: Option<f64>,

    /// Maximum monthly cost
    #[arg(long)]
    pub max_cost: Option<f64>,

    /// Minimum rating
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Maximum rating
    #[arg(long)]
    pub max_rating: Option<f64>,
}

impl FilterArgs {
    /// Build the library filter; an empty list means no restriction.
    pub fn to_filter(&self) -> ListingFilter {
        let mut filter = ListingFilter::new()
            .with_cost(self.min_cost, self.max_cost)
            .with_rating(self.min_rating, self.max_rating);
        if !self.locations.is_empty() {
            filter = filter.with_locations(&self.locations);
        }
        if !self.genders.is_empty() {
            filter = filter.with_genders(&self.genders);
        }
        if !self.types.is_empty() {
            filter = filter.with_types(&self.types);
        }
        filter
    }

    pub fn is_active(&self) -> bool {
        !self.locations.is_empty()
            || !self.genders.is_empty()
            || !self.types.is_empty()
            || self.min_cost.is_some()
            || self.max_cost.is_some()
            || self.min_rating.is_some()
            || self.max_rating.is_some()
    }
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
