//! CLI command handling
//!
//! Dispatches CLI commands and formats output.

mod prompt;

use std::io::{self, Write};

use colored::Colorize;

use crate::answers::{self, Answers};
use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::Result;
use crate::currency;
use crate::wizard::{Submission, WizardSession};

pub use prompt::{render_step, run_interactive};

/// Dispatch a CLI command
pub fn dispatch(command: Commands, config: &Config) -> Result<()> {
    colored::control::set_override(config.display.color);
    let prefix = config.display.currency_prefix.as_str();

    match command {
        Commands::Run { answers, json } => {
            let mut session = WizardSession::new().with_currency_prefix(prefix);

            if let Some(path) = answers {
                let answers = Answers::load(&path)?;
                tracing::info!(path = %path.display(), "Filling wizard from answers file");
                answers::fill_session(&mut session, &answers)?;
            } else {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                let mut out = io::stdout();
                run_interactive(&mut session, &mut input, &mut out)?;
            }

            // run_interactive and fill_session only return Ok once terminal
            let Some(submission) = session.submission() else {
                return Err(crate::Error::missing_precondition(
                    "wizard finished without a submission",
                ));
            };

            let mut out = io::stdout();
            if json {
                serde_json::to_writer_pretty(&mut out, &submission)?;
                writeln!(out)?;
            } else {
                print_submission(&mut out, &submission, prefix)?;
            }

            Ok(())
        }

        Commands::Parse { text } => {
            let parsed = currency::parse(&text)?;
            println!("{}", parsed.digits);
            println!("{}", parsed.rupiah(prefix));
            Ok(())
        }

        Commands::Format { amount } => {
            println!("{}", currency::format_rupiah(prefix, amount));
            Ok(())
        }
    }
}

/// Print the collected data as a short report
pub fn print_submission<W: Write>(out: &mut W, submission: &Submission, prefix: &str) -> Result<()> {
    let amount = |value: u128| currency::format_rupiah(prefix, value);

    writeln!(out, "{}", "Ringkasan Data".bold())?;
    writeln!(out, "  Jenis kelamin pewaris: {}", submission.gender)?;
    writeln!(out, "  Harta kotor:           {}", amount(submission.harta_kotor))?;
    writeln!(out, "  Hutang:                {}", amount(submission.hutang))?;
    writeln!(out, "  Wasiat:                {}", amount(submission.wasiat))?;
    writeln!(
        out,
        "  Harta bersih:          {}",
        amount(submission.harta_bersih).green().bold()
    )?;

    if submission.ahli_waris.is_empty() {
        writeln!(out, "  Ahli waris:            {}", "tidak ada".dimmed())?;
    } else {
        writeln!(out, "  Ahli waris:            {}", submission.ahli_waris.present().join(", "))?;
    }

    Ok(())
}
