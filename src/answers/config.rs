//! Answers file types
//!
//! Defines the data structures for deserializing YAML answers files.
//! Grouped amounts must be quoted, since YAML reads `50.000` as a float.
//! Bare integers may be as wide as `u128`.

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::common::{Error, Result};
use crate::wizard::{FieldId, StepKind};

/// Everything needed to complete the wizard
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Answers {
    /// Decedent's gender, e.g. "Laki-laki"
    pub gender: String,
    /// Gross assets
    pub harta_kotor: AmountAnswer,
    /// Debts (empty means zero)
    #[serde(default)]
    pub hutang: Option<AmountAnswer>,
    /// Bequest (empty means zero)
    #[serde(default)]
    pub wasiat: Option<AmountAnswer>,
    /// Surviving heirs
    #[serde(default)]
    pub ahli_waris: HeirAnswers,
}

/// An amount written either as text or as a bare integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountAnswer {
    Whole(u128),
    Text(String),
}

// `#[serde(untagged)]` buffers through a content type that has no u128
impl<'de> Deserialize<'de> for AmountAnswer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = AmountAnswer;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer or an amount string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                Ok(AmountAnswer::Whole(u128::from(v)))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<Self::Value, E> {
                Ok(AmountAnswer::Whole(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                Ok(AmountAnswer::Text(v.to_string()))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

impl AmountAnswer {
    /// The raw text fed to the field
    pub fn as_input(&self) -> String {
        match self {
            Self::Whole(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Heir step answers; only one of `istri`/`suami` may be given
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct HeirAnswers {
    pub istri: Option<bool>,
    pub suami: Option<bool>,
    pub ayah: Option<bool>,
    pub ibu: Option<bool>,
    pub anak_laki: Option<u32>,
    pub anak_perempuan: Option<u32>,
}

impl Answers {
    /// Load answers from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_yaml(&content)
    }

    /// Parse answers from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::Answers(format!("Failed to parse answers: {}", e)))
    }

    /// Field inputs for one step, in form order
    pub fn inputs_for(&self, step: StepKind) -> Vec<(FieldId, String)> {
        let flag = |b: bool| (if b { "ya" } else { "tidak" }).to_string();

        match step {
            StepKind::DataAwal => vec![
                (FieldId::Gender, self.gender.clone()),
                (FieldId::HartaKotor, self.harta_kotor.as_input()),
            ],
            StepKind::Hutang => vec![(
                FieldId::Hutang,
                self.hutang.as_ref().map(AmountAnswer::as_input).unwrap_or_default(),
            )],
            StepKind::Wasiat => vec![(
                FieldId::Wasiat,
                self.wasiat.as_ref().map(AmountAnswer::as_input).unwrap_or_default(),
            )],
            StepKind::AhliWaris => {
                let heirs = &self.ahli_waris;
                let mut inputs = Vec::new();
                if let Some(b) = heirs.istri {
                    inputs.push((FieldId::Istri, flag(b)));
                }
                if let Some(b) = heirs.suami {
                    inputs.push((FieldId::Suami, flag(b)));
                }
                if let Some(b) = heirs.ayah {
                    inputs.push((FieldId::Ayah, flag(b)));
                }
                if let Some(b) = heirs.ibu {
                    inputs.push((FieldId::Ibu, flag(b)));
                }
                if let Some(n) = heirs.anak_laki {
                    inputs.push((FieldId::AnakLaki, n.to_string()));
                }
                if let Some(n) = heirs.anak_perempuan {
                    inputs.push((FieldId::AnakPerempuan, n.to_string()));
                }
                inputs
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_answers() {
        let answers = Answers::from_yaml(
            r#"
gender: Laki-laki
harta_kotor: "1.000.000.000"
hutang: "50.000.000"
wasiat: 10000000
ahli_waris:
  istri: true
  anak_perempuan: 2
"#,
        )
        .unwrap();

        assert_eq!(answers.gender, "Laki-laki");
        assert_eq!(answers.harta_kotor.as_input(), "1.000.000.000");
        assert_eq!(answers.wasiat.as_ref().unwrap().as_input(), "10000000");
        assert_eq!(
            answers.inputs_for(StepKind::AhliWaris),
            vec![
                (FieldId::Istri, "ya".to_string()),
                (FieldId::AnakPerempuan, "2".to_string())
            ]
        );
    }

    #[test]
    fn test_missing_debt_is_empty_input() {
        let answers = Answers::from_yaml("gender: Perempuan\nharta_kotor: 500\n").unwrap();
        assert_eq!(
            answers.inputs_for(StepKind::Hutang),
            vec![(FieldId::Hutang, String::new())]
        );
        assert!(answers.inputs_for(StepKind::AhliWaris).is_empty());
    }

    #[test]
    fn test_bare_integer_wider_than_u64() {
        let answers =
            Answers::from_yaml("gender: Laki-laki\nharta_kotor: 20000000000000000000\n").unwrap();
        assert_eq!(
            answers.harta_kotor,
            AmountAnswer::Whole(20_000_000_000_000_000_000)
        );
        assert_eq!(answers.harta_kotor.as_input(), "20000000000000000000");
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = Answers::from_yaml("gender: Laki-laki\nharta_kotor: -5\n").unwrap_err();
        assert!(matches!(err, Error::Answers(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Answers::from_yaml("gender: Perempuan\nharta_kotor: 1\nkakek: true\n").unwrap_err();
        assert!(matches!(err, Error::Answers(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Answers::load(&dir.path().join("none.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
