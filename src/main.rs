//! Binary entry point: set up logging, parse the command line and hand over
//! to the library.
use clap::Parser;
use roster_keeper::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

/// Fatal problems (an unwritable data directory, a rejected entry) surface as
/// an error message and a non-zero exit code.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
