use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// Path missing or unreadable.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File exists but is not a well-formed capture or artifact document.
    #[error("'{}' is not a valid {kind}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        kind: &'static str,
        reason: String,
    },
    /// No entry matches the requested operation.
    #[error("{}", not_found_message(path, operation.as_deref()))]
    NotFound {
        path: PathBuf,
        operation: Option<String>,
    },
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CaptureError {
    /// Whether the capture was readable but held no matching operation.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn not_found_message(path: &Path, operation: Option<&str>) -> String {
    match operation {
        Some(operation) => format!(
            "operation \"{operation}\" not found in '{}'",
            path.display()
        ),
        None => format!("no GraphQL operation found in '{}'", path.display()),
    }
}
