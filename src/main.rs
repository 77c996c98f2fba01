//! addonforge - schema-driven builder and validator for add-on JSON
//!
//! Command-line front end over the registry, projector and validator crates.

mod cli;
mod config;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::AppConfig;
use tracing::debug;

fn main() -> Result<ExitCode> {
    // WARN by default; RUST_LOG overrides. Logs go to stderr so stdout stays pipeable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_from_path(&cli.config);
    debug!(?config, "starting addonforge v{}", env!("CARGO_PKG_VERSION"));

    let mut stdout = std::io::stdout().lock();
    let passed = cli::run(&cli, &config, &mut stdout)?;
    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
