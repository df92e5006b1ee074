//! CLI command implementations.

pub mod export;
pub mod show;
pub mod summary;
pub mod top;

use colored::Colorize;
use pgdash::{Dashboard, DashboardConfig, DataSource, LoadedData};

use crate::cli::SourceArgs;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Build a dashboard from the optional config file and load the source.
pub fn load(args: &SourceArgs) -> Result<LoadedData, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    let dashboard = Dashboard::with_config(config)?;
    let source = DataSource::parse(&args.source)?;
    Ok(dashboard.load(&source)?)
}

/// The notice shown when filters leave nothing to display.
pub fn print_no_matches() {
    println!(
        "{}",
        "No listings match the current filters. Try widening them.".yellow()
    );
}

/// Render tags as a comma-separated list.
pub fn format_tags<'a>(tags: impl IntoIterator<Item = &'a String>) -> String {
    tags.into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Truncate `text` to at most `width` characters, marking the cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
