use thiserror::Error;

/// Errors produced while rendering generated sources.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A slot value cannot be embedded in the target construct.
    #[error("cannot render {slot}: {reason}")]
    InvalidSlot { slot: &'static str, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
