//! Wizard session state machine
//!
//! A [`WizardSession`] owns every step of one run. Input is routed to the
//! current step only, and [`WizardSession::advance`] moves forward one step
//! at a time once the current step's rule holds. There is no way back.

use serde::Serialize;

use super::field::{FieldDescriptor, FieldError, FieldId, FieldValue, Gender};
use super::heirs::{self, HeirComposition, SpouseField};
use super::step::{PriorValues, StepKind, StepState, ValidationIssue};
use crate::common::{Error, Result};
use crate::currency;

/// Result of routing one raw input into a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Input parsed and replaced the stored value
    Accepted(FieldValue),
    /// Input kept as raw text; the previous value is unchanged
    Rejected(FieldError),
}

impl FieldOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Result of pressing "Next"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved one step forward; `to` is `None` when the wizard is now complete
    Moved { from: StepKind, to: Option<StepKind> },
    /// Current step is incomplete; nothing changed
    Blocked {
        step: StepKind,
        issues: Vec<ValidationIssue>,
    },
    /// Already past the last step
    AlreadyTerminal,
}

impl Advance {
    /// Whether the step index changed
    pub fn accepted(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// The current step as a view should render it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    pub index: usize,
    pub kind: StepKind,
    pub title: &'static str,
    /// Guidance shown under the title
    pub hint: Option<String>,
    pub visible_fields: Vec<FieldDescriptor>,
}

impl StepDescriptor {
    pub fn field(&self, id: FieldId) -> Option<&FieldDescriptor> {
        self.visible_fields.iter().find(|f| f.id == id)
    }

    /// Whether a field with this label is shown
    pub fn shows(&self, label: &str) -> bool {
        self.visible_fields.iter().any(|f| f.label == label)
    }
}

/// Everything the wizard collected, ready for the share calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub gender: Gender,
    pub harta_kotor: u128,
    pub hutang: u128,
    pub wasiat: u128,
    /// Gross assets less debts and bequest
    pub harta_bersih: u128,
    pub ahli_waris: HeirComposition,
}

/// One run of the wizard
#[derive(Debug, Clone)]
pub struct WizardSession {
    steps: Vec<StepState>,
    current: usize,
    spouse: Option<SpouseField>,
    currency_prefix: String,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    /// Start a session at the first step with nothing entered
    pub fn new() -> Self {
        Self {
            steps: StepKind::ORDER.into_iter().map(StepState::new).collect(),
            current: 0,
            spouse: None,
            currency_prefix: currency::DEFAULT_PREFIX.to_string(),
        }
    }

    /// Use a different currency prefix in hints and messages
    pub fn with_currency_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.currency_prefix = prefix.into();
        self
    }

    pub fn currency_prefix(&self) -> &str {
        &self.currency_prefix
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// All steps passed; the session is ready for submission
    pub fn is_terminal(&self) -> bool {
        self.current >= self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&StepState> {
        self.steps.get(index)
    }

    /// Spouse field of the heirs step, once the first step has been left
    pub fn spouse_field(&self) -> Option<SpouseField> {
        self.spouse
    }

    /// Describe the current step, or `None` once the wizard is complete
    pub fn current_step(&self) -> Option<StepDescriptor> {
        let step = self.steps.get(self.current)?;
        let kind = step.kind();

        Some(StepDescriptor {
            index: self.current,
            kind,
            title: kind.title(),
            hint: self.hint(kind),
            visible_fields: step
                .active_fields()
                .iter()
                .map(|id| FieldDescriptor::new(*id, step.entry(*id)))
                .collect(),
        })
    }

    /// Route raw input into a field of the current step
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<FieldOutcome> {
        self.record_field(self.current, name, raw)
    }

    /// Type `text` into a field one character at a time
    ///
    /// Each keystroke appends to whatever the field currently shows, including
    /// rejected text, and is parsed on its own. Returns the outcome of the
    /// last keystroke.
    pub fn type_text(&mut self, name: &str, text: &str) -> Result<FieldOutcome> {
        let field: FieldId = name.parse()?;
        let mut shown = self
            .steps
            .get(self.current)
            .and_then(|s| s.entry(field))
            .map(|e| e.current_text())
            .unwrap_or_default();

        if text.is_empty() {
            return self.set_field(name, &shown);
        }

        let mut outcome = None;
        for ch in text.chars() {
            shown.push(ch);
            outcome = Some(self.set_field(name, &shown)?);
        }
        // text is non-empty, so at least one keystroke ran
        outcome.ok_or_else(|| Error::UnknownField(name.to_string()))
    }

    /// Record input for a field on a given step
    ///
    /// Only the current step takes input, and only for fields in its active
    /// set. A parse failure is not an error: the raw text is kept beside the
    /// last accepted value and the step stays incomplete until corrected.
    pub fn record_field(&mut self, step_index: usize, name: &str, raw: &str) -> Result<FieldOutcome> {
        if self.is_terminal() {
            return Err(Error::SessionComplete);
        }

        let field: FieldId = name.parse()?;
        let prior = self.prior_values();
        let step = self
            .steps
            .get_mut(step_index)
            .ok_or_else(|| Error::field_not_active(field.name(), "unknown step"))?;

        if step_index != self.current || !step.is_active(field) {
            return Err(Error::field_not_active(field.name(), step.kind().title()));
        }

        let outcome = match field.parse_input(raw) {
            Ok(value) => {
                let entry = step.entry_mut(field);
                entry.accepted = Some(value.clone());
                entry.rejected = None;
                FieldOutcome::Accepted(value)
            }
            Err(e) => {
                step.entry_mut(field).rejected = Some(FieldValue::RawText(raw.to_string()));
                FieldOutcome::Rejected(e)
            }
        };

        let issues = step.revalidate(&prior);
        tracing::debug!(
            step = %step.kind(),
            field = %field,
            accepted = outcome.is_accepted(),
            complete = issues.is_empty(),
            "Recorded field input"
        );

        Ok(outcome)
    }

    /// Move to the next step if the current one is complete
    ///
    /// Leaving the first step resolves the heirs step's spouse field. The
    /// only error is a broken precondition in that resolution.
    #[tracing::instrument(skip(self), fields(step = self.current))]
    pub fn advance(&mut self) -> Result<Advance> {
        if self.is_terminal() {
            return Ok(Advance::AlreadyTerminal);
        }

        let prior = self.prior_values();
        let step = &mut self.steps[self.current];
        let from = step.kind();
        let issues = step.revalidate(&prior);

        if !issues.is_empty() {
            tracing::warn!(step = %from, ?issues, "Step incomplete; staying");
            return Ok(Advance::Blocked { step: from, issues });
        }

        if from == StepKind::DataAwal {
            self.resolve_heirs()?;
        }

        self.current += 1;
        let to = self.steps.get(self.current).map(StepState::kind);

        match to {
            Some(next) => tracing::info!(from = %from, to = %next, "Advanced"),
            None => tracing::info!(from = %from, "Wizard complete"),
        }

        Ok(Advance::Moved { from, to })
    }

    /// Heirs as entered; needs the spouse field to have been resolved
    pub fn heir_composition(&self) -> Result<HeirComposition> {
        let spouse_field = self.spouse.ok_or_else(|| {
            Error::missing_precondition("heir fields have not been resolved")
        })?;
        let step = self
            .steps
            .iter()
            .find(|s| s.kind() == StepKind::AhliWaris)
            .ok_or_else(|| Error::missing_precondition("no heirs step"))?;

        let flag = |id: FieldId| step.value(id).and_then(FieldValue::as_flag).unwrap_or(false);
        let count = |id: FieldId| {
            step.value(id)
                .and_then(FieldValue::as_amount)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0)
        };

        Ok(HeirComposition {
            spouse_field,
            spouse: flag(spouse_field.field_id()),
            ayah: flag(FieldId::Ayah),
            ibu: flag(FieldId::Ibu),
            anak_laki: count(FieldId::AnakLaki),
            anak_perempuan: count(FieldId::AnakPerempuan),
        })
    }

    /// Collected data, available once every step has been passed
    pub fn submission(&self) -> Option<Submission> {
        if !self.is_terminal() {
            return None;
        }

        let prior = self.prior_values();
        let gender = self.gender()?;
        let wasiat = self.amount(StepKind::Wasiat, FieldId::Wasiat).unwrap_or(0);
        let ahli_waris = self.heir_composition().ok()?;

        Some(Submission {
            gender,
            harta_kotor: prior.harta_kotor.unwrap_or(0),
            hutang: prior.hutang.unwrap_or(0),
            wasiat,
            harta_bersih: prior.after_debts().saturating_sub(wasiat),
            ahli_waris,
        })
    }

    fn resolve_heirs(&mut self) -> Result<()> {
        let spouse = heirs::resolve(self.gender())?;
        let prior = self.prior_values();

        if let Some(step) = self.steps.iter_mut().find(|s| s.kind() == StepKind::AhliWaris) {
            step.set_active_fields(heirs::heir_fields(spouse));
            step.revalidate(&prior);
        }

        tracing::debug!(spouse = spouse.label(), "Resolved heir fields");
        self.spouse = Some(spouse);
        Ok(())
    }

    fn gender(&self) -> Option<Gender> {
        self.value(StepKind::DataAwal, FieldId::Gender)
            .and_then(FieldValue::as_gender)
    }

    fn amount(&self, kind: StepKind, field: FieldId) -> Option<u128> {
        self.value(kind, field).and_then(FieldValue::as_amount)
    }

    fn value(&self, kind: StepKind, field: FieldId) -> Option<&FieldValue> {
        self.steps
            .iter()
            .find(|s| s.kind() == kind)
            .and_then(|s| s.value(field))
    }

    fn prior_values(&self) -> PriorValues {
        PriorValues {
            harta_kotor: self.amount(StepKind::DataAwal, FieldId::HartaKotor),
            hutang: self.amount(StepKind::Hutang, FieldId::Hutang),
        }
    }

    fn hint(&self, kind: StepKind) -> Option<String> {
        match kind {
            StepKind::Wasiat => Some(format!(
                "Maksimal 1/3 dari sisa harta setelah hutang. Batas maksimal: {}",
                currency::format_rupiah(&self.currency_prefix, self.prior_values().max_bequest())
            )),
            _ => None,
        }
    }
}
