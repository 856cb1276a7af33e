//! Kalkulator Waris CLI
//!
//! Walks through the inheritance calculator's input wizard on the terminal,
//! or fills it from an answers file.

use clap::Parser;
use kalkulator::commands::Commands;
use kalkulator::common::{config::Config, logging};
use kalkulator::cli;

#[derive(Parser)]
#[command(name = "kalkulator", about = "Inheritance calculator input wizard")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let guard = logging::init_cli(&config.logging);
    if guard.is_some() {
        if let Some(path) = logging::log_file_path() {
            tracing::debug!(path = %path.display(), "Writing log file");
        }
    }

    let result = cli::dispatch(cli.command, &config);
    if let Err(e) = &result {
        if e.is_contract_violation() {
            tracing::error!(error = %e, "Wizard contract violated");
        }
        eprintln!("Error: {e}");
    }

    // Flush the file log before exiting
    drop(guard);
    if result.is_err() {
        std::process::exit(1);
    }
}
