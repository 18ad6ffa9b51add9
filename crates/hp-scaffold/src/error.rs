use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("required project file not found: '{}'", path.display())]
    MissingFile { path: PathBuf },

    #[error("cannot patch '{}': {reason}", path.display())]
    MalformedFile { path: PathBuf, reason: String },

    /// The scenario is already present; callers record a skip and continue.
    #[error("scenario {scenario} is already registered in '{}'", path.display())]
    AlreadyRegistered { scenario: String, path: PathBuf },

    #[error("invalid JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
