//! # hp-render
//!
//! Turns an inferred response shape into executable k6 source text:
//!
//! - [`synthesize`] walks a [`hp_schema::SchemaNode`] and emits ordered [`CheckSpec`]s.
//! - [`render_script`] fills the fixed slots of a standalone k6 script.
//! - [`project_files`] renders the per-operation query, step and test sources
//!   and the entry-file snippets the scaffold mutator inserts.
//!
//! Every slot has exactly one escaping function in [`escape`]; nothing here
//! touches the filesystem.
//!
//! [`CheckSpec`]: hp_core::checks::CheckSpec

pub mod error;
pub mod escape;
pub mod project_files;
pub mod script;
pub mod step;
pub mod synth;

pub use error::RenderError;
pub use script::{ScriptOptions, ScriptSlots, render_script};
pub use step::{RuleBasedStepGenerator, StepGenerator};
pub use synth::{synthesize, synthesize_exchange};
