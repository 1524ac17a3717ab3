// s3ls: A tool for listing, filtering and deleting objects in AWS S3.
#![forbid(unsafe_code)]
use anyhow::Result;
use std::env;
use std::io::{
    self,
    IsTerminal,
};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod cli;
mod common;
mod inventory;
mod s3;

// Build the log filter from RUST_LOG style `directives`. Warnings are shown
// when nothing else is requested.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

#[tokio::main]
async fn main() -> Result<()> {
    let directives = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    // Logs go to stderr so they never mix with the inventory on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_writer(io::stderr)
        .init();

    let matches = cli::parse_args();
    let config  = cli::client_config(&matches);

    let client = s3::Client::new(&config).await?;

    let stdout   = io::stdout();
    let colorize = stdout.is_terminal();

    debug!("main: colorize output: {}", colorize);

    let mut out = stdout.lock();

    inventory::run(&client, &config, &mut out, colorize).await
}
