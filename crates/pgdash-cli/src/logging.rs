use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a stderr subscriber so log lines never mix with command output.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "pgdash=debug" } else { "pgdash=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}
