//! Wizard steps and their completion rules

use std::collections::BTreeMap;
use std::fmt;

use super::field::{FieldEntry, FieldId, FieldValue};
use crate::currency;

/// The steps of the wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Gender and gross assets
    DataAwal,
    Hutang,
    Wasiat,
    AhliWaris,
}

impl StepKind {
    pub const ORDER: [StepKind; 4] = [Self::DataAwal, Self::Hutang, Self::Wasiat, Self::AhliWaris];

    /// Heading of the step as rendered
    pub fn title(&self) -> &'static str {
        match self {
            Self::DataAwal => "Data Awal",
            Self::Hutang => "Step 2: Total Hutang",
            Self::Wasiat => "Step 3: Wasiat",
            Self::AhliWaris => "Step 4: Data Ahli Waris",
        }
    }

    /// Fields shown on this step before any resolution
    ///
    /// The heirs step starts empty; its fields depend on the gender and are
    /// installed when the first step is left.
    pub fn initial_fields(&self) -> Vec<FieldId> {
        match self {
            Self::DataAwal => vec![FieldId::Gender, FieldId::HartaKotor],
            Self::Hutang => vec![FieldId::Hutang],
            Self::Wasiat => vec![FieldId::Wasiat],
            Self::AhliWaris => Vec::new(),
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Why a step cannot be left yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A field has no accepted value
    Missing(FieldId),
    /// A field shows text that was not accepted
    Rejected(FieldId),
    /// An amount too wide for the estate arithmetic
    AmountTooLarge(FieldId),
    /// Gross assets must be positive
    NonPositiveAssets,
    /// Bequest above a third of the estate after debts
    BequestTooLarge { max: u128 },
    /// Heir fields have not been resolved
    HeirsUnresolved,
}

impl ValidationIssue {
    /// User-facing message
    pub fn message(&self, currency_prefix: &str) -> String {
        match self {
            Self::Missing(FieldId::Gender) => "Pilih jenis kelamin pewaris".to_string(),
            Self::Missing(FieldId::HartaKotor) | Self::NonPositiveAssets => {
                "Masukkan harta kotor yang valid".to_string()
            }
            Self::Missing(field) => format!("Isi {}", field.label()),
            Self::Rejected(field) => format!("{} berisi karakter yang tidak valid", field.label()),
            Self::AmountTooLarge(field) => format!("{} terlalu besar untuk dihitung", field.label()),
            Self::BequestTooLarge { max } => format!(
                "Wasiat maksimal adalah {}",
                currency::format_rupiah(currency_prefix, *max)
            ),
            Self::HeirsUnresolved => "Data ahli waris belum siap".to_string(),
        }
    }
}

/// Values from earlier steps that a later step's rule depends on
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorValues {
    pub harta_kotor: Option<u128>,
    pub hutang: Option<u128>,
}

impl PriorValues {
    /// Estate left once debts are paid, never below zero
    pub fn after_debts(&self) -> u128 {
        self.harta_kotor
            .unwrap_or(0)
            .saturating_sub(self.hutang.unwrap_or(0))
    }

    /// Largest bequest allowed: a third of the estate after debts
    pub fn max_bequest(&self) -> u128 {
        self.after_debts() / 3
    }
}

/// Form state of one step
#[derive(Debug, Clone)]
pub struct StepState {
    kind: StepKind,
    active: Vec<FieldId>,
    fields: BTreeMap<FieldId, FieldEntry>,
    complete: bool,
}

impl StepState {
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            active: kind.initial_fields(),
            fields: BTreeMap::new(),
            complete: false,
        }
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Fields shown on this step, in display order
    pub fn active_fields(&self) -> &[FieldId] {
        &self.active
    }

    pub fn is_active(&self, field: FieldId) -> bool {
        self.active.contains(&field)
    }

    pub fn entry(&self, field: FieldId) -> Option<&FieldEntry> {
        self.fields.get(&field)
    }

    /// Last accepted value of an active field
    pub fn value(&self, field: FieldId) -> Option<&FieldValue> {
        if !self.is_active(field) {
            return None;
        }
        self.fields.get(&field).and_then(|e| e.accepted.as_ref())
    }

    pub(crate) fn entry_mut(&mut self, field: FieldId) -> &mut FieldEntry {
        self.fields.entry(field).or_default()
    }

    /// Replace the field set, dropping entries for fields no longer shown
    pub(crate) fn set_active_fields(&mut self, fields: Vec<FieldId>) {
        self.fields.retain(|id, _| fields.contains(id));
        self.active = fields;
    }

    /// Run this step's rule and store the result
    pub(crate) fn revalidate(&mut self, prior: &PriorValues) -> Vec<ValidationIssue> {
        let issues = self.validate(prior);
        self.complete = issues.is_empty();
        issues
    }

    /// Everything standing between this step and the next
    pub fn validate(&self, prior: &PriorValues) -> Vec<ValidationIssue> {
        let mut issues: Vec<ValidationIssue> = self
            .active
            .iter()
            .filter(|id| self.fields.get(*id).is_some_and(FieldEntry::has_rejection))
            .map(|id| ValidationIssue::Rejected(*id))
            .collect();

        issues.extend(
            self.active
                .iter()
                .filter(|id| {
                    self.value(**id)
                        .and_then(FieldValue::as_parsed_amount)
                        .is_some_and(|parsed| parsed.value().is_none())
                })
                .map(|id| ValidationIssue::AmountTooLarge(*id)),
        );

        match self.kind {
            StepKind::DataAwal => {
                if self.value(FieldId::Gender).is_none() {
                    issues.push(ValidationIssue::Missing(FieldId::Gender));
                }
                match self.value(FieldId::HartaKotor) {
                    None => issues.push(ValidationIssue::Missing(FieldId::HartaKotor)),
                    Some(value) if value.as_amount() == Some(0) => {
                        issues.push(ValidationIssue::NonPositiveAssets)
                    }
                    Some(_) => {}
                }
            }
            StepKind::Hutang => {
                if self.value(FieldId::Hutang).is_none() {
                    issues.push(ValidationIssue::Missing(FieldId::Hutang));
                }
            }
            StepKind::Wasiat => match self.value(FieldId::Wasiat) {
                None => issues.push(ValidationIssue::Missing(FieldId::Wasiat)),
                Some(value) => {
                    if let Some(bequest) = value.as_amount() {
                        // Exact form of bequest <= after_debts / 3
                        let within = bequest
                            .checked_mul(3)
                            .is_some_and(|tripled| tripled <= prior.after_debts());
                        if !within {
                            issues.push(ValidationIssue::BequestTooLarge {
                                max: prior.max_bequest(),
                            });
                        }
                    }
                }
            },
            StepKind::AhliWaris => {
                if self.active.is_empty() {
                    issues.push(ValidationIssue::HeirsUnresolved);
                }
            }
        }

        issues
    }
}
