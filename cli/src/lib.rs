use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;

type Result<T> = std::result::Result<T, error::Error>;

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    cli.run();
}
