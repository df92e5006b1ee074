//! Export command - write enriched listings as CSV or JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use colored::Colorize;
use pgdash::export::{write_csv, write_json, Jitter};

use super::{load, CommandResult};
use crate::cli::{FilterArgs, OutputFormat, SourceArgs};

pub fn run(
    source: SourceArgs,
    filter: FilterArgs,
    output: Option<PathBuf>,
    format: OutputFormat,
    jitter: Option<f64>,
    seed: u64,
) -> CommandResult {
    if let Some(radius) = jitter {
        if !radius.is_finite() || radius < 0.0 {
            return Err(format!("Invalid jitter radius: {}", radius).into());
        }
    }

    let loaded = load(&source)?;
    let view = loaded.table.filter(&filter.to_filter());
    let spread = jitter.map(|radius| Jitter { radius, seed });

    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format {
        OutputFormat::Csv => write_csv(&view, writer, spread)?,
        OutputFormat::Json => {
            if spread.is_some() {
                tracing::warn!("jitter only applies to CSV export");
            }
            let mut writer = writer;
            write_json(&view, &mut writer)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }

    if let Some(path) = output {
        eprintln!(
            "{} {} listings to {}",
            "Exported".green().bold(),
            view.len(),
            path.display().to_string().white()
        );
    }

    Ok(())
}
