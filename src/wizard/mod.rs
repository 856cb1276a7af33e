//! Multi-step input wizard
//!
//! Collects the decedent's gender and assets, debts, bequest and surviving
//! heirs, one step at a time. The session is an owned value: views hold it
//! and call into it, nothing is global.

pub mod field;
pub mod heirs;
mod session;
pub mod step;

pub use field::{Choice, FieldDescriptor, FieldEntry, FieldError, FieldId, FieldKind, FieldValue, Gender};
pub use heirs::{resolve, HeirComposition, SpouseField};
pub use session::{Advance, FieldOutcome, StepDescriptor, Submission, WizardSession};
pub use step::{StepKind, StepState, ValidationIssue};
