//! # hp-scaffold
//!
//! Registers a generated test in an existing k6 scaffold project.
//!
//! The project is read once into a [`ProjectSnapshot`]. [`integrate`] is pure:
//! it turns a snapshot and a [`Registration`] into a [`ScaffoldPlan`] holding
//! the full new content of every file to write plus an
//! [`IntegrationReport`](hp_core::responses::IntegrationReport). Only
//! [`commit`] touches the filesystem, writing each file atomically.
//!
//! Every patch is idempotent. Integrating the same operation into the result
//! of a previous integration yields an empty plan.

mod commit;
mod entry;
mod error;
mod plan;
mod run_config;
mod snapshot;
mod source_scan;
mod test_data;

pub use commit::commit;
pub use error::ScaffoldError;
pub use plan::{FileChange, Registration, ScaffoldPlan, integrate};
pub use snapshot::ProjectSnapshot;
