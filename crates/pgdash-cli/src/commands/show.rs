//! Show command - list the listings that pass the filters.

use colored::Colorize;
use pgdash::NormalizeReport;

use super::{format_tags, load, print_no_matches, truncate, CommandResult};
use crate::cli::{FilterArgs, SourceArgs};

pub fn run(source: SourceArgs, filter: FilterArgs, verbose: bool) -> CommandResult {
    let loaded = load(&source)?;
    let view = loaded.table.filter(&filter.to_filter());

    println!(
        "{} {}",
        "Listings from".cyan().bold(),
        source.source.white()
    );
    println!(
        "Displaying {} of {} listings",
        view.len().to_string().white().bold(),
        view.total()
    );
    print_report(&loaded.report, verbose);
    println!();

    if view.is_empty() {
        print_no_matches();
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:24} {:20} {:10} {:>8} {:>6} {:14} {}",
            "Name", "Location", "Sharing", "Cost", "Rating", "Gender", "Tags"
        )
        .bold()
    );
    for listing in view.iter() {
        println!(
            "{:24} {:20} {:10} {:>8.0} {:>6.1} {:14} {}",
            truncate(listing.display_name(), 24),
            truncate(&listing.location, 20),
            truncate(&listing.sharing, 10),
            listing.cost,
            listing.rating,
            truncate(&listing.gender, 14),
            format_tags(&listing.derived.tags).dimmed()
        );
    }

    Ok(())
}

fn print_report(report: &NormalizeReport, verbose: bool) {
    if !report.excluded.is_empty() {
        println!(
            "{} {} rows with a cost outside the admissible range",
            "Excluded".yellow(),
            report.excluded.len()
        );
    }

    if !verbose {
        return;
    }

    println!(
        "Read {} rows, kept {}",
        report.rows_read, report.rows_kept
    );
    println!(
        "Costs defaulted: {}, ranges averaged: {}, ratings defaulted: {}",
        report.costs_defaulted, report.cost_ranges_averaged, report.ratings_defaulted
    );
    for (from, to) in &report.renamed_columns {
        println!("  {} {} {}", from.dimmed(), "→".dimmed(), to);
    }
    for row in &report.excluded {
        println!(
            "  row {}: {:?} ({})",
            row.source_row + 1,
            row.raw_cost,
            row.cost
        );
    }
    if !report.dropped_columns.is_empty() {
        println!("Dropped columns: {}", report.dropped_columns.join(", "));
    }
}
