//! Lenient serde model of the HAR fields the extractor reads.
//!
//! Unknown fields are ignored and every field the extractor does not strictly
//! need is optional, so traces from different browsers decode alike.

use base64::Engine as _;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct HarDocument {
    #[serde(default)]
    pub log: Option<HarLog>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HarLog {
    /// Kept as raw values so one malformed entry cannot fail the whole document.
    #[serde(default)]
    pub entries: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HarEntry {
    pub request: HarRequest,
    #[serde(default)]
    pub response: Option<HarResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HarRequest {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "postData")]
    pub post_data: Option<HarPostData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HarPostData {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HarResponse {
    #[serde(default)]
    pub content: Option<HarContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HarContent {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// The GraphQL request body carried in `postData.text`.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlBody {
    #[serde(default, rename = "operationName")]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub variables: Value,
}

impl HarRequest {
    /// `POST`, `PUT` and `PATCH` carry request bodies.
    pub fn is_body_carrying(&self) -> bool {
        ["POST", "PUT", "PATCH"]
            .iter()
            .any(|method| self.method.eq_ignore_ascii_case(method))
    }
}

/// Why a response body could not be turned into JSON.
#[derive(Debug)]
pub(crate) enum BodyError {
    Base64(base64::DecodeError),
    Utf8(std::string::FromUtf8Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for BodyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base64(error) => write!(f, "invalid base64 body: {error}"),
            Self::Utf8(error) => write!(f, "decoded body is not UTF-8: {error}"),
            Self::Json(error) => write!(f, "body is not JSON: {error}"),
        }
    }
}

impl HarContent {
    /// Decode the transport encoding and parse the body as JSON.
    ///
    /// Returns `Ok(None)` when the entry recorded no body text.
    pub fn decode_json(&self) -> Result<Option<Value>, BodyError> {
        let Some(text) = self.text.as_deref().filter(|text| !text.is_empty()) else {
            return Ok(None);
        };

        let is_base64 = self
            .encoding
            .as_deref()
            .is_some_and(|encoding| encoding.eq_ignore_ascii_case("base64"));

        let decoded = if is_base64 {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(text.trim())
                .map_err(BodyError::Base64)?;
            String::from_utf8(bytes).map_err(BodyError::Utf8)?
        } else {
            text.to_string()
        };

        serde_json::from_str(&decoded)
            .map(Some)
            .map_err(BodyError::Json)
    }
}
