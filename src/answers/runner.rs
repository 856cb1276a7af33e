//! Answers runner
//!
//! Drives a session through every step using an answers file.

use crate::common::{Error, Result};
use crate::wizard::{Advance, FieldOutcome, WizardSession};

use super::config::Answers;

/// Fill every remaining step of `session` from `answers`
///
/// Stops at the first refused input or blocked step; the session is left
/// where it stopped.
pub fn fill_session(session: &mut WizardSession, answers: &Answers) -> Result<()> {
    while let Some(step) = session.current_step() {
        tracing::debug!(step = step.title, "Filling step from answers");

        for (field, raw) in answers.inputs_for(step.kind) {
            match session.set_field(field.name(), &raw)? {
                FieldOutcome::Accepted(_) => {}
                FieldOutcome::Rejected(e) => {
                    return Err(Error::Answers(format!("{} '{}': {}", field.label(), raw, e)));
                }
            }
        }

        match session.advance()? {
            Advance::Moved { .. } => {}
            Advance::Blocked { step, issues } => {
                let prefix = session.currency_prefix();
                let reasons: Vec<String> = issues.iter().map(|i| i.message(prefix)).collect();
                return Err(Error::Answers(format!(
                    "{} cannot be completed: {}",
                    step.title(),
                    reasons.join("; ")
                )));
            }
            Advance::AlreadyTerminal => break,
        }
    }

    Ok(())
}
