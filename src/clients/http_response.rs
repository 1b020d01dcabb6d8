//! HTTP response types for the Graph API adapter.
//!
//! This module provides the [`HttpResponse`] type returned by the generic call
//! path, plus [`GraphErrorInfo`] for reading Graph error bodies.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

/// The `error` object of a Graph API error body.
///
/// # Example
///
/// ```rust
/// use meta_graph_api::clients::GraphErrorInfo;
///
/// let body = r#"{"error":{"message":"Invalid OAuth access token.","type":"OAuthException","code":190,"fbtrace_id":"AbC"}}"#;
/// let info = GraphErrorInfo::from_body(body).unwrap();
///
/// assert_eq!(info.code, Some(190));
/// assert_eq!(info.error_type.as_deref(), Some("OAuthException"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GraphErrorInfo {
    /// Human readable error message.
    #[serde(default)]
    pub message: Option<String>,
    /// Error type, e.g. `OAuthException`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Numeric error code.
    #[serde(default)]
    pub code: Option<i64>,
    /// Numeric error subcode.
    #[serde(default)]
    pub error_subcode: Option<i64>,
    /// Trace ID to quote when reporting the error to Meta.
    #[serde(default)]
    pub fbtrace_id: Option<String>,
}

#[derive(Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorInfo,
}

impl GraphErrorInfo {
    /// Parses the `error` object out of a raw response body.
    #[must_use]
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str::<GraphErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error)
    }
}

/// An HTTP response from the Graph API.
///
/// The body is kept as raw text; callers decode it with [`json`](Self::json).
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The canonical reason phrase for the status code.
    pub reason_phrase: String,
    /// Response headers, keyed by lower-cased name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(
        code: u16,
        reason_phrase: impl Into<String>,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            code,
            reason_phrase: reason_phrase.into(),
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Decodes the body as JSON.
    ///
    /// An empty body decodes to `null`.
    ///
    /// # Errors
    ///
    /// Returns the decoding error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&self.body)
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `x-fb-trace-id` header value, if present.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.header("x-fb-trace-id")
    }

    /// Returns the `x-fb-request-id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-fb-request-id")
    }

    /// Returns the `facebook-api-version` header, naming the version that served the call.
    #[must_use]
    pub fn served_api_version(&self) -> Option<&str> {
        self.header("facebook-api-version")
    }

    /// Returns the parsed Graph error object, if the body carries one.
    #[must_use]
    pub fn graph_error(&self) -> Option<GraphErrorInfo> {
        GraphErrorInfo::from_body(&self.body)
    }

    /// Returns the first value of every header, for logging.
    #[must_use]
    pub fn header_summary(&self) -> BTreeMap<&str, &str> {
        self.headers
            .iter()
            .filter_map(|(name, values)| {
                values
                    .first()
                    .map(|value| (name.as_str(), value.as_str()))
            })
            .collect()
    }
}
