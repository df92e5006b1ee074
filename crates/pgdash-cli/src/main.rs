//! pgdash CLI - terminal dashboard for PG/hostel listings.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Show { source, filter } => commands::show::run(source, filter, cli.verbose),

        Commands::Summary {
            source,
            filter,
            json,
        } => commands::summary::run(source, filter, json),

        Commands::Top {
            source,
            filter,
            count,
        } => commands::top::run(source, filter, count),

        Commands::Export {
            source,
            filter,
            output,
            format,
            jitter,
            seed,
        } => commands::export::run(source, filter, output, format, jitter, seed),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
