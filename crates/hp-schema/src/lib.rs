//! # hp-schema
//!
//! Schema work for Harpoon, in two halves:
//! - [`infer`]: a best-effort structural type tree ([`SchemaNode`]) built from a
//!   single example response value.
//! - [`SchemaRegistry`]: JSON Schemas for the documents `hpn` reads and writes,
//!   generated from hp-core types with `schemars` and validated with `jsonschema`.
//!
//! Inference is a lower bound for the captured instance only: optional fields,
//! nullable fields and heterogeneous arrays are invisible to a single sample.

mod error;
mod infer;
mod registry;

pub use error::SchemaError;
pub use infer::{SchemaField, SchemaInferrer, SchemaNode, TYPENAME_FIELD, infer};
pub use registry::SchemaRegistry;
