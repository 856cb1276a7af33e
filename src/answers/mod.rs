//! Answers files
//!
//! An answers file fills the wizard without prompting: every step gets the
//! values from the file and "Next" is pressed for it. It goes through the
//! same session API as the interactive front end, so the same rules apply.

mod config;
mod runner;

pub use config::*;
pub use runner::fill_session;
