//! belfry CLI entry point.

mod cli;

use std::path::Path;

use belfry::pipeline::{render_json, render_text, render_tower, resolve_scenario};
use belfry::scenario::load_scenario_file;
use clap::Parser;
use cli::{Cli, Command, Format};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logging is off unless BELFRY_LOG is set, e.g. `BELFRY_LOG=belfry_resolve=trace`.
    if let Ok(filter) = EnvFilter::try_from_env("BELFRY_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!("tracing initialized");
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Resolve { file, format } => resolve_file(&file, format),
        Command::Tower { file } => print_tower(&file),
    }
}

fn resolve_file(path: &Path, format: Format) {
    let db = salsa::DatabaseImpl::new();
    let scenario = match load_scenario_file(&db, path) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error loading scenario: {e}");
            std::process::exit(1);
        }
    };

    let reports = resolve_scenario(&db, &scenario);
    match format {
        Format::Text => print!("{}", render_text(&reports)),
        Format::Json => match render_json(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error writing report: {e}");
                std::process::exit(1);
            }
        },
    }
}

fn print_tower(path: &Path) {
    let db = salsa::DatabaseImpl::new();
    match load_scenario_file(&db, path) {
        Ok(scenario) => print!("{}", render_tower(&db, &scenario)),
        Err(e) => {
            eprintln!("Error loading scenario: {e}");
            std::process::exit(1);
        }
    }
}
