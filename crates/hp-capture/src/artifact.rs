//! Reading and writing the pre-extracted capture artifact document.

use std::fs;
use std::path::{Path, PathBuf};

use hp_core::exchange::{CaptureArtifact, CapturedExchange};
use hp_schema::{SchemaError, SchemaRegistry};
use serde_json::Value;

use crate::error::CaptureError;

const ARTIFACT_KIND: &str = "capture artifact";

/// `<operation>-capture.json` next to the capture file.
#[must_use]
pub fn default_artifact_path(capture_path: &Path, operation: &str) -> PathBuf {
    capture_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{operation}-capture.json"))
}

/// Load an artifact document and convert it into an exchange.
///
/// The document is validated against the registered `capture_artifact`
/// schema before conversion, so every structural problem is reported at once.
///
/// # Errors
///
/// `Io` when the file cannot be read, `Parse` for invalid JSON, schema
/// violations, or an empty operation name or query.
pub fn read_artifact(path: &Path) -> Result<CapturedExchange, CaptureError> {
    let source = fs::read_to_string(path).map_err(|source| CaptureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |reason: String| CaptureError::Parse {
        path: path.to_path_buf(),
        kind: ARTIFACT_KIND,
        reason,
    };

    let value: Value = serde_json::from_str(&source).map_err(|e| parse_error(e.to_string()))?;

    match SchemaRegistry::new().validate("capture_artifact", &value) {
        Ok(()) => {}
        Err(SchemaError::ValidationFailed { errors }) => return Err(parse_error(errors.join("; "))),
        Err(other) => return Err(parse_error(other.to_string())),
    }

    let artifact: CaptureArtifact =
        serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))?;
    CapturedExchange::try_from(artifact).map_err(|e| parse_error(e.to_string()))
}

/// Write `exchange` as a pretty-printed artifact document.
pub fn write_artifact(path: &Path, exchange: &CapturedExchange) -> Result<(), CaptureError> {
    let write_error = |source| CaptureError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut rendered = serde_json::to_string_pretty(&CaptureArtifact::from(exchange))
        .map_err(|e| write_error(std::io::Error::other(e)))?;
    rendered.push('\n');
    fs::write(path, rendered).map_err(write_error)?;
    tracing::info!(path = %path.display(), operation = exchange.operation_name(), "wrote capture artifact");
    Ok(())
}
