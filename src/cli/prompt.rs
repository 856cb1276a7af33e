//! Interactive wizard
//!
//! Renders the current step, prompts for each visible field, and presses
//! "Next" once every field has an answer. A blocked step is shown again with
//! the reasons.

use std::io::{BufRead, Write};

use colored::Colorize;

use crate::common::{Error, Result};
use crate::wizard::{Advance, FieldDescriptor, FieldKind, FieldOutcome, StepDescriptor, WizardSession};

/// Run the wizard against a line-based input until it is complete
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut WizardSession,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    while let Some(step) = session.current_step() {
        render_step(out, &step)?;

        for field in &step.visible_fields {
            prompt_field(session, &step, field, input, out)?;
        }

        match session.advance()? {
            Advance::Moved { .. } => writeln!(out)?,
            Advance::Blocked { issues, .. } => {
                for issue in &issues {
                    writeln!(out, "  {}", issue.message(session.currency_prefix()).red())?;
                }
                writeln!(out)?;
            }
            Advance::AlreadyTerminal => break,
        }
    }

    Ok(())
}

/// Print the step heading and hint
pub fn render_step<W: Write>(out: &mut W, step: &StepDescriptor) -> Result<()> {
    writeln!(out, "{}", step.title.bold())?;
    if let Some(hint) = &step.hint {
        writeln!(out, "{}", hint.dimmed())?;
    }
    Ok(())
}

fn prompt_field<R: BufRead, W: Write>(
    session: &mut WizardSession,
    step: &StepDescriptor,
    field: &FieldDescriptor,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        write!(out, "{}{}: ", field.label, options_hint(field.kind))?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed(step.title.to_string()));
        }
        let raw = line.trim_end_matches(['\r', '\n']);

        match session.set_field(field.name, raw)? {
            FieldOutcome::Accepted(_) => return Ok(()),
            FieldOutcome::Rejected(e) => writeln!(out, "  {}", e.to_string().red())?,
        }
    }
}

fn options_hint(kind: FieldKind) -> String {
    match kind {
        FieldKind::Choice(options) => format!(" [{}]", options.join("/")),
        FieldKind::Toggle => " [ya/tidak]".to_string(),
        FieldKind::Amount | FieldKind::Count => String::new(),
    }
}
