//! Form fields and the values they hold

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::currency::{self, ParsedAmount, ParseError};

/// Decedent's gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Option label shown on the form
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Laki-laki",
            Self::Female => "Perempuan",
        }
    }

    /// Parse a gender choice from its label or a short alias
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "laki-laki" | "laki" | "l" | "male" | "m" => Some(Self::Male),
            "perempuan" | "p" | "female" | "f" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every field the wizard knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Gender,
    HartaKotor,
    Hutang,
    Wasiat,
    Istri,
    Suami,
    Ayah,
    Ibu,
    AnakLaki,
    AnakPerempuan,
}

impl FieldId {
    pub const ALL: [FieldId; 10] = [
        Self::Gender,
        Self::HartaKotor,
        Self::Hutang,
        Self::Wasiat,
        Self::Istri,
        Self::Suami,
        Self::Ayah,
        Self::Ibu,
        Self::AnakLaki,
        Self::AnakPerempuan,
    ];

    /// Machine name used by `setField` and answers files
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::HartaKotor => "harta_kotor",
            Self::Hutang => "hutang",
            Self::Wasiat => "wasiat",
            Self::Istri => "istri",
            Self::Suami => "suami",
            Self::Ayah => "ayah",
            Self::Ibu => "ibu",
            Self::AnakLaki => "anak_laki",
            Self::AnakPerempuan => "anak_perempuan",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gender => "Jenis Kelamin Pewaris",
            Self::HartaKotor => "Total Harta Kotor",
            Self::Hutang => "Total Hutang",
            Self::Wasiat => "Total Wasiat",
            Self::Istri => "Istri",
            Self::Suami => "Suami",
            Self::Ayah => "Ayah",
            Self::Ibu => "Ibu",
            Self::AnakLaki => "Anak Laki-laki",
            Self::AnakPerempuan => "Anak Perempuan",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Gender => FieldKind::Choice(&["Laki-laki", "Perempuan"]),
            Self::HartaKotor | Self::Hutang | Self::Wasiat => FieldKind::Amount,
            Self::Istri | Self::Suami | Self::Ayah | Self::Ibu => FieldKind::Toggle,
            Self::AnakLaki | Self::AnakPerempuan => FieldKind::Count,
        }
    }

    /// Parse raw input for this field
    pub fn parse_input(&self, raw: &str) -> Result<FieldValue, FieldError> {
        match self.kind() {
            FieldKind::Amount => Ok(FieldValue::Amount(currency::parse(raw)?)),
            FieldKind::Count => {
                let parsed = currency::parse(raw)?;
                if !parsed.value().is_some_and(|n| n <= u128::from(u32::MAX)) {
                    return Err(FieldError::CountTooLarge);
                }
                Ok(FieldValue::Amount(parsed))
            }
            FieldKind::Choice(options) => Gender::parse(raw)
                .map(|g| FieldValue::Choice(Choice::Gender(g)))
                .ok_or_else(|| FieldError::UnknownOption {
                    input: raw.to_string(),
                    options: options.join(", "),
                }),
            FieldKind::Toggle => parse_flag(raw)
                .map(|b| FieldValue::Choice(Choice::Checked(b)))
                .ok_or_else(|| FieldError::NotAFlag(raw.to_string())),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldId {
    type Err = crate::common::Error;

    /// Look a field up by machine name or by label, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(needle) || f.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| crate::common::Error::UnknownField(s.to_string()))
    }
}

/// How a field takes input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Rupiah amount with `.` grouping
    Amount,
    /// Number of people
    Count,
    /// One of a fixed set of option labels
    Choice(&'static [&'static str]),
    /// Check box
    Toggle,
}

/// Enumerated choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Gender(Gender),
    Checked(bool),
}

/// An accepted field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// Text that has not been accepted as a value
    RawText(String),
    Amount(ParsedAmount),
    Choice(Choice),
}

impl FieldValue {
    /// Text to show back in the input
    pub fn display(&self) -> String {
        match self {
            Self::RawText(text) => text.clone(),
            Self::Amount(parsed) => parsed.display.clone(),
            Self::Choice(Choice::Gender(g)) => g.label().to_string(),
            Self::Choice(Choice::Checked(true)) => "ya".to_string(),
            Self::Choice(Choice::Checked(false)) => "tidak".to_string(),
        }
    }

    /// Numeric value of an amount that fits in `u128`
    pub fn as_amount(&self) -> Option<u128> {
        self.as_parsed_amount().and_then(ParsedAmount::value)
    }

    pub fn as_parsed_amount(&self) -> Option<&ParsedAmount> {
        match self {
            Self::Amount(parsed) => Some(parsed),
            _ => None,
        }
    }

    pub fn as_gender(&self) -> Option<Gender> {
        match self {
            Self::Choice(Choice::Gender(g)) => Some(*g),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Choice(Choice::Checked(b)) => Some(*b),
            _ => None,
        }
    }
}

/// Why a raw input was not accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error(transparent)]
    Amount(#[from] ParseError),

    #[error("Count is too large")]
    CountTooLarge,

    #[error("'{input}' is not one of: {options}")]
    UnknownOption { input: String, options: String },

    #[error("'{0}' is not a yes/no answer")]
    NotAFlag(String),
}

/// Stored state of one field
///
/// `accepted` is the last value that parsed; `rejected` holds the raw text
/// of a later input that did not, until the user corrects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldEntry {
    pub accepted: Option<FieldValue>,
    pub rejected: Option<FieldValue>,
}

impl FieldEntry {
    /// Text the input currently shows
    pub fn current_text(&self) -> String {
        self.rejected
            .as_ref()
            .or(self.accepted.as_ref())
            .map(FieldValue::display)
            .unwrap_or_default()
    }

    pub fn has_rejection(&self) -> bool {
        self.rejected.is_some()
    }
}

/// Field as presented to a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Current input text
    pub display: String,
    /// Raw text awaiting correction, if the last input was refused
    pub rejected: Option<String>,
}

impl FieldDescriptor {
    pub(crate) fn new(id: FieldId, entry: Option<&FieldEntry>) -> Self {
        Self {
            id,
            name: id.name(),
            label: id.label(),
            kind: id.kind(),
            display: entry.map(FieldEntry::current_text).unwrap_or_default(),
            rejected: entry
                .and_then(|e| e.rejected.as_ref())
                .map(FieldValue::display),
        }
    }
}

fn parse_flag(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "ya" | "y" | "yes" | "true" | "1" | "x" | "on" => Some(true),
        "" | "tidak" | "t" | "no" | "n" | "false" | "0" | "off" => Some(false),
        _ => None,
    }
}
