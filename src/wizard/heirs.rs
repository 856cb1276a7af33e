//! Heir field resolution
//!
//! Only one spouse can survive the decedent, and which one depends on the
//! decedent's gender: a man leaves a wife ("Istri"), a woman a husband
//! ("Suami"). The heirs step carries exactly one of the two fields.

use serde::{Deserialize, Serialize};

use super::field::{FieldId, Gender};
use crate::common::{Error, Result};

/// The spouse field shown on the heirs step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpouseField {
    Istri,
    Suami,
}

impl SpouseField {
    pub fn field_id(&self) -> FieldId {
        match self {
            Self::Istri => FieldId::Istri,
            Self::Suami => FieldId::Suami,
        }
    }

    pub fn label(&self) -> &'static str {
        self.field_id().label()
    }
}

/// Resolve the spouse field from the recorded gender
///
/// The gender step gates navigation, so `None` here means the session was
/// driven around its own checks.
pub fn resolve(gender: Option<Gender>) -> Result<SpouseField> {
    match gender {
        Some(Gender::Male) => Ok(SpouseField::Istri),
        Some(Gender::Female) => Ok(SpouseField::Suami),
        None => {
            tracing::error!("Heir fields requested before the decedent's gender was recorded");
            Err(Error::missing_precondition(
                "decedent's gender must be recorded before heir fields are resolved",
            ))
        }
    }
}

/// Ordered field set of the heirs step for a resolved spouse field
pub fn heir_fields(spouse: SpouseField) -> Vec<FieldId> {
    vec![
        spouse.field_id(),
        FieldId::Ayah,
        FieldId::Ibu,
        FieldId::AnakLaki,
        FieldId::AnakPerempuan,
    ]
}

/// Surviving heirs as entered on the heirs step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeirComposition {
    /// Which spouse field applied
    pub spouse_field: SpouseField,
    /// Whether that spouse survives
    pub spouse: bool,
    pub ayah: bool,
    pub ibu: bool,
    pub anak_laki: u32,
    pub anak_perempuan: u32,
}

impl HeirComposition {
    /// Whether anyone at all was entered
    pub fn is_empty(&self) -> bool {
        !self.spouse && !self.ayah && !self.ibu && self.anak_laki == 0 && self.anak_perempuan == 0
    }

    /// Labels of the heirs present, with counts for children
    pub fn present(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.spouse {
            out.push(self.spouse_field.label().to_string());
        }
        if self.ayah {
            out.push(FieldId::Ayah.label().to_string());
        }
        if self.ibu {
            out.push(FieldId::Ibu.label().to_string());
        }
        if self.anak_laki > 0 {
            out.push(format!("{} ({} orang)", FieldId::AnakLaki.label(), self.anak_laki));
        }
        if self.anak_perempuan > 0 {
            out.push(format!(
                "{} ({} orang)",
                FieldId::AnakPerempuan.label(),
                self.anak_perempuan
            ));
        }
        out
    }
}
