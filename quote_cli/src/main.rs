//! # Cutquote CLI
//!
//! Command-line caller of the costing engine: cost single pieces, price
//! offer files and browse the material catalog.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=debug quote offer offer.json`).

use std::process::ExitCode;

use clap::Parser;
use quote_core::CalcError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod config;

use cli::{Cli, Commands};

/// Initialize tracing/logging
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn run(args: Cli) -> anyhow::Result<()> {
    let config = config::load_config(&args.config)?;

    match &args.command {
        Commands::Cost(cost_args) => commands::cost::execute(cost_args, &config),
        Commands::Offer { file, json } => commands::offer::execute(file, *json, &config),
        Commands::Materials { json } => commands::materials::execute(*json, &config),
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc_error) = e.downcast_ref::<CalcError>() {
                if let Ok(json) = serde_json::to_string_pretty(calc_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}
