//! split - assign dataset rows to train/dev/test splits.
//!
//! Thin front end over `splitter-core`: reads split weights and grouping
//! columns, prints one split name per row.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod config;
mod error;
mod input;
mod output;

use cli::Cli;

fn main() -> Result<()> {
    // Prefer RUST_LOG, fall back to SPLIT_LOG. Logs go to stderr so stdout
    // stays machine-readable.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("SPLIT_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
