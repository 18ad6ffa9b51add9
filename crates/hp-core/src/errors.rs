//! Cross-cutting error types for Harpoon.
//!
//! Domain-specific errors (e.g., `CaptureError`, `ScaffoldError`) are defined in
//! their respective crates. They converge into `anyhow` in `hp-cli`.

use thiserror::Error;

/// Errors that can be raised by any Harpoon crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (empty operation name, malformed identifier, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}
