//! Example: Load a listings sheet and print what the pipeline made of it.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path_or_url>
//!
//! Example:
//!   cargo run --example analyze -- crates/pgdash/tests/data/pg_data.csv

use std::env;

use pgdash::{Dashboard, DataSource, FilterOptions, Summary};

fn main() -> pgdash::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path_or_url>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- crates/pgdash/tests/data/pg_data.csv");
        std::process::exit(1);
    }

    let source = DataSource::parse(&args[1])?;
    let dashboard = Dashboard::new()?;
    let loaded = dashboard.load(&source)?;

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("pgdash: {}", source);
    println!("{}", separator);
    println!();

    println!("## Source Metadata");
    println!("  Source: {}", loaded.source.source);
    println!("  Format: {}", loaded.source.format);
    println!("  Rows: {}", loaded.source.row_count);
    println!("  Columns: {}", loaded.source.column_count);
    println!("  Hash: {}", loaded.source.hash);
    println!();

    let report = &loaded.report;
    println!("## Normalization");
    println!("  Kept {} of {} rows", report.rows_kept, report.rows_read);
    println!("  Costs defaulted: {}", report.costs_defaulted);
    println!("  Cost ranges averaged: {}", report.cost_ranges_averaged);
    println!("  Ratings defaulted: {}", report.ratings_defaulted);
    for row in &report.excluded {
        println!("  Excluded row {}: {:?}", row.source_row + 1, row.raw_cost);
    }
    println!();

    let options = FilterOptions::from_table(&loaded.table);
    println!("## Filter Options");
    println!("  Locations: {:?}", options.locations);
    println!("  Genders: {:?}", options.genders);
    println!("  Types: {:?}", options.types);
    println!();

    let view = loaded.table.view();
    let summary = Summary::from_view(&view);
    println!("## Average Cost by Location");
    for (location, cost) in &summary.avg_cost_by_location {
        println!("  {:24} {:>8}", location, cost);
    }
    println!();

    println!("## Best Value");
    for listing in view.top_by_value(5) {
        println!(
            "  {:24} {:>8.3}  {:?}",
            listing.display_name(),
            listing.derived.value_score,
            listing.derived.tags
        );
    }

    Ok(())
}
