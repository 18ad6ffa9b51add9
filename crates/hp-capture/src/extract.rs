use std::fs;
use std::path::Path;

use hp_core::exchange::CapturedExchange;
use hp_core::responses::OperationSummary;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::CaptureError;
use crate::har::{GraphqlBody, HarDocument, HarEntry};

/// A GraphQL-shaped entry found in a capture document.
#[derive(Debug, Clone)]
pub struct GraphqlEntry {
    /// Position of the entry in `log.entries`.
    pub index: usize,
    pub method: String,
    pub exchange: CapturedExchange,
}

impl GraphqlEntry {
    #[must_use]
    pub fn summary(&self) -> OperationSummary {
        OperationSummary {
            index: self.index,
            operation: self.exchange.operation_name().to_string(),
            method: self.method.clone(),
            url: self.exchange.url().to_string(),
            has_response: self.exchange.response_body().is_some(),
        }
    }
}

/// A parsed capture document with its entries still undecoded.
#[derive(Debug)]
pub struct CaptureDocument {
    entries: Vec<Value>,
}

impl CaptureDocument {
    /// Parse a HAR document from text.
    ///
    /// # Errors
    ///
    /// Fails when `source` is not JSON or its `log` is not HAR-shaped.
    pub fn parse(source: &str) -> Result<Self, serde_json::Error> {
        let document: HarDocument = serde_json::from_str(source)?;
        Ok(Self {
            entries: document.log.map(|log| log.entries).unwrap_or_default(),
        })
    }

    /// Read and parse a HAR document from disk.
    pub fn read(path: &Path) -> Result<Self, CaptureError> {
        let source = fs::read_to_string(path).map_err(|source| CaptureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source).map_err(|error| CaptureError::Parse {
            path: path.to_path_buf(),
            kind: "capture document",
            reason: error.to_string(),
        })
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Every GraphQL-shaped entry, in document order.
    pub fn graphql_entries(&self) -> impl Iterator<Item = GraphqlEntry> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| decode_entry(index, raw, None))
    }

    /// First GraphQL-shaped entry, optionally restricted to `operation`.
    #[must_use]
    pub fn find(&self, operation: Option<&str>) -> Option<GraphqlEntry> {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(index, raw)| decode_entry(index, raw, operation))
    }
}

/// Extract the first exchange for `operation` (or the first GraphQL exchange
/// of any name) from the capture file at `path`.
///
/// # Errors
///
/// `Io` when the file cannot be read, `Parse` when it is not a capture
/// document, `NotFound` when no entry matches.
pub fn extract(path: &Path, operation: Option<&str>) -> Result<CapturedExchange, CaptureError> {
    let document = CaptureDocument::read(path)?;
    tracing::debug!(
        path = %path.display(),
        entries = document.entry_count(),
        operation = operation.unwrap_or("<any>"),
        "scanning capture document"
    );

    document
        .find(operation)
        .map(|entry| entry.exchange)
        .ok_or_else(|| CaptureError::NotFound {
            path: path.to_path_buf(),
            operation: operation.map(ToString::to_string),
        })
}

/// Summaries of every GraphQL-shaped entry in the capture file at `path`.
pub fn list_operations(path: &Path) -> Result<Vec<OperationSummary>, CaptureError> {
    let document = CaptureDocument::read(path)?;
    Ok(document
        .graphql_entries()
        .map(|entry| entry.summary())
        .collect())
}

fn decode_entry(index: usize, raw: &Value, wanted: Option<&str>) -> Option<GraphqlEntry> {
    let entry = match HarEntry::deserialize(raw) {
        Ok(entry) => entry,
        Err(error) => {
            tracing::debug!(index, %error, "skipping entry without a HAR request");
            return None;
        }
    };

    if !entry.request.is_body_carrying() {
        return None;
    }

    let text = entry.request.post_data.as_ref()?.text.as_deref()?;
    let body = match serde_json::from_str::<Value>(text) {
        Ok(body @ Value::Object(_)) => GraphqlBody::deserialize(&body).ok()?,
        Ok(_) => return None,
        Err(error) => {
            tracing::debug!(index, %error, "skipping entry whose body is not JSON");
            return None;
        }
    };

    let operation_name = body.operation_name.filter(|name| !name.is_empty())?;
    let query = body.query.filter(|query| !query.is_empty())?;

    if wanted.is_some_and(|wanted| wanted != operation_name) {
        return None;
    }

    let variables = match body.variables {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            tracing::debug!(index, kind = json_kind(&other), "ignoring non-object variables");
            Map::new()
        }
    };

    let response = entry
        .response
        .as_ref()
        .and_then(|response| response.content.as_ref())
        .and_then(|content| match content.decode_json() {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(
                    index,
                    operation = %operation_name,
                    %error,
                    "response body ignored"
                );
                None
            }
        });

    match CapturedExchange::new(
        entry.request.url,
        operation_name,
        variables,
        query,
        response,
    ) {
        Ok(exchange) => Some(GraphqlEntry {
            index,
            method: entry.request.method.to_ascii_uppercase(),
            exchange,
        }),
        Err(error) => {
            tracing::debug!(index, %error, "skipping entry with an unusable operation");
            None
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
