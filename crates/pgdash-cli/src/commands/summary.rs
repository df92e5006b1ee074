//! Summary command - filter options and chart aggregates.

use colored::Colorize;
use indexmap::IndexMap;
use pgdash::{FilterOptions, Summary};

use super::{load, print_no_matches, CommandResult};
use crate::cli::{FilterArgs, SourceArgs};

const BAR_WIDTH: usize = 30;

pub fn run(source: SourceArgs, filter: FilterArgs, json_output: bool) -> CommandResult {
    let loaded = load(&source)?;
    let options = FilterOptions::from_table(&loaded.table);
    let view = loaded.table.filter(&filter.to_filter());
    let summary = Summary::from_view(&view);

    if json_output {
        let status = serde_json::json!({
            "source": loaded.source,
            "filters": filter.to_filter(),
            "options": options,
            "summary": summary,
            "report": loaded.report,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Summary for".cyan().bold(),
        source.source.white()
    );
    println!();

    println!("{}", "Filter options:".yellow().bold());
    println!("  Locations: {}", options.locations.join(", "));
    println!("  Genders:   {}", options.genders.join(", "));
    println!("  Types:     {}", options.types.join(", "));
    if let Some((min, max)) = options.cost_bounds {
        println!("  Cost:      {:.0} - {:.0}", min, max);
    }
    println!();

    println!(
        "Displaying {} of {} listings",
        summary.displayed.to_string().white().bold(),
        summary.total
    );
    if summary.is_empty() {
        println!();
        print_no_matches();
        return Ok(());
    }
    if let (Some(cost), Some(rating)) = (summary.mean_cost, summary.mean_rating) {
        println!("Mean cost {:.0}, mean rating {:.2}", cost, rating);
    }
    println!();

    print_bars("Average cost by location", &summary.avg_cost_by_location);
    print_bars("Average cost by sharing", &summary.avg_cost_by_sharing);

    let counts: IndexMap<String, f64> = summary
        .count_by_location
        .iter()
        .map(|(k, v)| (k.clone(), *v as f64))
        .collect();
    print_bars("Listings by location", &counts);

    Ok(())
}

/// Horizontal bar chart scaled to the largest value.
fn print_bars(title: &str, values: &IndexMap<String, f64>) {
    println!("{}", format!("{}:", title).yellow().bold());
    let max = values.values().copied().fold(0.0_f64, f64::max);
    let label_width = values.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    for (label, value) in values {
        let filled = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        println!(
            "  {:width$} {} {}",
            label,
            "█".repeat(filled).cyan(),
            value,
            width = label_width
        );
    }
    println!();
}
