//! Cross-cutting error types for the spinner.
//!
//! Storage errors (`DatabaseError`) live in `spin-db`. A unified error is
//! deferred to `spin-cli` where all crate errors converge into `anyhow`.

use thiserror::Error;

/// Errors raised by pure domain logic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Data failed validation (empty names, inverted date ranges).
    #[error("Validation error: {0}")]
    Validation(String),
}
