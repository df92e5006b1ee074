//! Top command - best listings by value score.

use colored::Colorize;

use super::{format_tags, load, print_no_matches, truncate, CommandResult};
use crate::cli::{FilterArgs, SourceArgs};

pub fn run(source: SourceArgs, filter: FilterArgs, count: usize) -> CommandResult {
    let loaded = load(&source)?;
    let view = loaded.table.filter(&filter.to_filter());

    if view.is_empty() {
        print_no_matches();
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Top".cyan().bold(),
        count.min(view.len()).to_string().white().bold(),
        "listings by value score".cyan().bold()
    );
    println!();

    for (rank, listing) in view.top_by_value(count).into_iter().enumerate() {
        println!(
            "{:>3}. {} {}",
            rank + 1,
            truncate(listing.display_name(), 32).white().bold(),
            format!("({})", listing.location).dimmed()
        );
        println!(
            "     score {}  cost {:.0}  rating {:.1}  {}",
            format!("{:.3}", listing.derived.value_score).green(),
            listing.cost,
            listing.rating,
            format_tags(&listing.derived.tags).dimmed()
        );
    }

    Ok(())
}
