//! # hp-capture
//!
//! Capture document scanning for Harpoon.
//!
//! Reads browser network traces (HAR), finds GraphQL-shaped request entries,
//! decodes their response bodies (plain or base64) and returns a
//! [`hp_core::exchange::CapturedExchange`]. Also reads and writes the
//! pre-extracted artifact document consumed by `hpn generate`.
//!
//! Scanning is first-match-wins in document order. Entries that are not
//! GraphQL-shaped are skipped, never reported as errors.

mod artifact;
mod error;
mod extract;
mod har;

pub use artifact::{default_artifact_path, read_artifact, write_artifact};
pub use error::CaptureError;
pub use extract::{CaptureDocument, GraphqlEntry, extract, list_operations};
