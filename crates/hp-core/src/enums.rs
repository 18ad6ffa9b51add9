//! Small closed enums shared between the pipeline crates.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PrimitiveKind
// ---------------------------------------------------------------------------

/// Scalar kinds a generated `typeof` assertion can check for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Boolean,
    Number,
    String,
}

impl PrimitiveKind {
    /// The name JavaScript's `typeof` operator reports for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NumericStringPolicy
// ---------------------------------------------------------------------------

/// How schema inference classifies strings whose content parses as a number.
///
/// `Literal` keeps the JSON kind of the example (`"42"` is a string).
/// `Number` classifies such strings as numbers (`"42"` is asserted as a number).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NumericStringPolicy {
    #[default]
    Literal,
    Number,
}

impl NumericStringPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for NumericStringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FileStatus
// ---------------------------------------------------------------------------

/// What the scaffold mutator did with one target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Created,
    Updated,
    Skipped,
}

impl FileStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Skipped => "skipped",
        }
    }

    /// Whether the file content changes on disk.
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
