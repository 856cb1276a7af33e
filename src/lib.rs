//! Kalkulator Waris - input wizard for an Islamic inheritance calculator
//!
//! This library provides the wizard that collects the estate and heir data
//! step by step, with Indonesian-style amount parsing and a spouse field that
//! follows the decedent's gender.

pub mod answers;
pub mod cli;
pub mod commands;
pub mod common;
pub mod currency;
pub mod wizard;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use wizard::{Advance, FieldOutcome, WizardSession};
