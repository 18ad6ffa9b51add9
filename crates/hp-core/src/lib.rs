//! # hp-core
//!
//! Core types, naming rules, and error types for Harpoon.
//!
//! This crate provides the foundational types shared across all Harpoon crates:
//! - The captured exchange and the on-disk capture artifact document
//! - Check specifications and safe-navigation access paths
//! - Identifier derivation for generated scaffold files
//! - Cross-cutting error types
//! - CLI response types

pub mod checks;
pub mod enums;
pub mod errors;
pub mod exchange;
pub mod naming;
pub mod responses;
