//! Spraycoat Dashboard - leads, job sites and quote options
//!
//! A CLI over the record store for a spray-seal contractor's office.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use spraycoat_app::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool, log_json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        // A broken config file can still be reset
        Err(_) if matches!(cli.command, Commands::Config { reset: true, .. }) => Config::default(),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    init_tracing(cli.verbose, config.log_json);

    if let Err(e) = commands::execute(cli, config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
