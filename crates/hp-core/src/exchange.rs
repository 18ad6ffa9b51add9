//! Captured GraphQL exchanges and the artifact document they are saved as.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::naming::is_valid_operation_name;

/// One recorded request/response pair for a named GraphQL operation.
///
/// Built once from a capture scan (or an artifact document) and read-only
/// afterwards. `operation_name` and `query_text` are never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedExchange {
    url: String,
    operation_name: String,
    variables: Map<String, Value>,
    query_text: String,
    response_body: Option<Value>,
}

impl CapturedExchange {
    /// Build an exchange, enforcing the non-empty name and query invariant.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the operation name is empty or not a
    /// GraphQL name, or when the query text is blank.
    pub fn new(
        url: impl Into<String>,
        operation_name: impl Into<String>,
        variables: Map<String, Value>,
        query_text: impl Into<String>,
        response_body: Option<Value>,
    ) -> Result<Self, CoreError> {
        let operation_name = operation_name.into();
        let query_text = query_text.into();

        if operation_name.is_empty() {
            return Err(CoreError::Validation(
                "operation name must not be empty".to_string(),
            ));
        }
        if !is_valid_operation_name(&operation_name) {
            return Err(CoreError::Validation(format!(
                "operation name '{operation_name}' is not a valid GraphQL name"
            )));
        }
        if query_text.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "query text for operation '{operation_name}' must not be empty"
            )));
        }

        Ok(Self {
            url: url.into(),
            operation_name,
            variables,
            query_text,
            response_body,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    #[must_use]
    pub const fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    #[must_use]
    pub const fn response_body(&self) -> Option<&Value> {
        self.response_body.as_ref()
    }

    /// The first field under the response's `data` container, with its value.
    ///
    /// Returns `None` when the response is absent, `data` is not an object, or
    /// `data` has no fields.
    #[must_use]
    pub fn root_field(&self) -> Option<(&str, &Value)> {
        self.response_body
            .as_ref()?
            .get("data")?
            .as_object()?
            .iter()
            .next()
            .map(|(name, value)| (name.as_str(), value))
    }
}

/// The pre-extracted artifact document written by `hpn extract` and read by
/// `hpn generate`.
///
/// ```json
/// { "request": { "url": "...", "operationName": "...", "variables": {}, "query": "..." },
///   "response": { "data": { } } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CaptureArtifact {
    pub request: ArtifactRequest,
    #[serde(default)]
    pub response: Option<Value>,
}

/// Request half of a [`CaptureArtifact`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ArtifactRequest {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "operationName")]
    pub operation_name: String,
    #[serde(default, deserialize_with = "null_as_empty_map")]
    pub variables: Map<String, Value>,
    pub query: String,
}

impl TryFrom<CaptureArtifact> for CapturedExchange {
    type Error = CoreError;

    fn try_from(artifact: CaptureArtifact) -> Result<Self, Self::Error> {
        let CaptureArtifact { request, response } = artifact;
        Self::new(
            request.url,
            request.operation_name,
            request.variables,
            request.query,
            response,
        )
    }
}

impl From<&CapturedExchange> for CaptureArtifact {
    fn from(exchange: &CapturedExchange) -> Self {
        Self {
            request: ArtifactRequest {
                url: exchange.url.clone(),
                operation_name: exchange.operation_name.clone(),
                variables: exchange.variables.clone(),
                query: exchange.query_text.clone(),
            },
            response: exchange.response_body.clone(),
        }
    }
}

/// Accept `null` where a variables object is expected.
fn null_as_empty_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}
