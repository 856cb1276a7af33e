//! CLI command definitions
//!
//! Defines the clap commands for the kalkulator CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the wizard step by step
    Run {
        /// Fill the wizard from a YAML answers file instead of prompting
        #[arg(long, short)]
        answers: Option<PathBuf>,

        /// Print the collected data as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse an amount the way the wizard's amount fields do
    Parse {
        /// Amount text, e.g. 1.000.000.000
        text: String,
    },

    /// Show an amount with thousands separators
    Format {
        /// Whole amount without separators
        amount: u128,
    },
}
