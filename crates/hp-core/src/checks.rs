//! Synthesized validation checks and the access paths they target.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::enums::PrimitiveKind;
use crate::naming::is_js_identifier;

/// One step from a JSON value to a child position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    /// The `[0]` accessor into an array's first element.
    FirstElement,
}

/// A path from the response root to one JSON position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AccessPath(Vec<PathSegment>);

impl AccessPath {
    /// The response root itself.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.to_string()));
        Self(segments)
    }

    #[must_use]
    pub fn first_element(&self) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::FirstElement);
        Self(segments)
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Dotted human-readable label, e.g. `data.list.items[0].id`.
    #[must_use]
    pub fn label(&self) -> String {
        let mut out = String::new();
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::FirstElement => out.push_str("[0]"),
            }
        }
        out
    }

    /// Safe-navigation JavaScript expression rooted at `binding`,
    /// e.g. `r.data?.list?.items?.[0]?.id`.
    ///
    /// Field names that are not plain identifiers use bracket access with a
    /// JSON-quoted key.
    #[must_use]
    pub fn expression(&self, binding: &str) -> String {
        let mut out = binding.to_string();
        for (index, segment) in self.0.iter().enumerate() {
            let chain = if index == 0 { "" } else { "?." };
            match segment {
                PathSegment::Field(name) if is_js_identifier(name) => {
                    if index == 0 {
                        out.push('.');
                    } else {
                        out.push_str(chain);
                    }
                    out.push_str(name);
                }
                PathSegment::Field(name) => {
                    out.push_str(chain);
                    out.push('[');
                    out.push_str(&Value::String(name.clone()).to_string());
                    out.push(']');
                }
                PathSegment::FirstElement => {
                    out.push_str(chain);
                    out.push_str("[0]");
                }
            }
        }
        out
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for AccessPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// What a check asserts about the value at its path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckKind {
    /// Key is present (value may be `null`).
    Exists,
    TypeOf { primitive: PrimitiveKind },
    IsArray,
    /// Exact match against the value observed in the example response.
    EqualsLiteral { value: Value },
}

/// One synthesized assertion.
///
/// `label` is the dotted form of `path` and is unique within one check set.
/// `guards` lists arrays (outermost first) that must be non-empty for the
/// check to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckSpec {
    pub label: String,
    pub path: AccessPath,
    #[serde(flatten)]
    pub kind: CheckKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub guards: Vec<AccessPath>,
}

impl CheckSpec {
    #[must_use]
    pub fn new(path: AccessPath, kind: CheckKind, guards: Vec<AccessPath>) -> Self {
        Self {
            label: path.label(),
            path,
            kind,
            guards,
        }
    }

    /// Check name as it appears in generated scripts.
    #[must_use]
    pub fn description(&self) -> String {
        match &self.kind {
            CheckKind::Exists => format!("{} exists", self.label),
            CheckKind::TypeOf { primitive } => format!("{} is {primitive}", self.label),
            CheckKind::IsArray => format!("{} is array", self.label),
            CheckKind::EqualsLiteral { value } => format!("{} equals {value}", self.label),
        }
    }
}
