//! Error types for the inheritance wizard
//!
//! User-correctable problems (bad amount text, an incomplete step) are not
//! errors here: they are kept as session state and reported through
//! [`crate::wizard::FieldOutcome`] and [`crate::wizard::Advance`]. This enum
//! covers misuse of the session contract and the CLI's environment.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the wizard and CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Session Errors ===
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{field}' is not shown on step '{step}'")]
    FieldNotActive { field: String, step: String },

    #[error("Wizard is already complete; no step accepts input")]
    SessionComplete,

    #[error("Missing precondition: {0}")]
    MissingPrecondition(String),

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid answers file: {0}")]
    Answers(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Input Errors ===
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] crate::currency::ParseError),

    #[error("Input ended before the wizard was complete (stopped at '{0}')")]
    InputClosed(String),
}

impl Error {
    /// Create a field-not-active error
    pub fn field_not_active(field: &str, step: &str) -> Self {
        Self::FieldNotActive {
            field: field.to_string(),
            step: step.to_string(),
        }
    }

    /// Create a missing precondition error
    pub fn missing_precondition(what: &str) -> Self {
        Self::MissingPrecondition(what.to_string())
    }

    /// Whether this error is a broken contract rather than bad input
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::MissingPrecondition(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_not_active_message() {
        let err = Error::field_not_active("suami", "Step 4: Data Ahli Waris");
        assert_eq!(
            err.to_string(),
            "Field 'suami' is not shown on step 'Step 4: Data Ahli Waris'"
        );
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn test_missing_precondition_is_contract_violation() {
        let err = Error::missing_precondition("gender not recorded");
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("gender not recorded"));
    }
}
