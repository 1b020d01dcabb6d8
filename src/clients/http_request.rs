//! HTTP request types for the Graph API adapter.
//!
//! This module provides the request envelope ([`RequestParams`]) and the
//! [`HttpRequest`] type with its builder.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::clients::errors::InvalidHttpRequestError;

/// Name of the parameter carrying the bearer token.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// HTTP methods used against the Graph API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET; parameters go in the query string.
    Get,
    /// HTTP POST; parameters go in a form-encoded body.
    Post,
    /// HTTP DELETE; parameters go in the query string.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if parameters for this method travel in the body.
    #[must_use]
    pub const fn sends_body(self) -> bool {
        matches!(self, Self::Post)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// The request envelope: a flat mapping from parameter name to string value.
///
/// The Graph API expects compound fields (shipping refund details,
/// cancellation reasons, item lists) as stringified JSON, so nested values are
/// serialized with [`insert_json`](Self::insert_json) before insertion.
///
/// # Example
///
/// ```rust
/// use meta_graph_api::clients::RequestParams;
/// use serde_json::json;
///
/// let mut params = RequestParams::new();
/// params.insert("name", "Main feed");
/// params.insert("limit", 25);
/// params.insert_json("items", &json!([{"retailer_id": "sku-1"}])).unwrap();
///
/// assert_eq!(params.get("limit"), Some("25"));
/// assert_eq!(params.get("items"), Some(r#"[{"retailer_id":"sku-1"}]"#));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestParams(BTreeMap<String, String>);

impl RequestParams {
    /// Creates an empty envelope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a scalar parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Serializes `value` to a JSON string and inserts it.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `value` cannot be encoded.
    pub fn insert_json<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        let encoded = serde_json::to_string(value)?;
        self.0.insert(key.into(), encoded);
        Ok(())
    }

    /// Returns a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if the parameter is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy of the envelope with the access token removed, for logging.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.remove(ACCESS_TOKEN_PARAM);
        copy
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K: Into<String>, V: ToString> Extend<(K, V)> for RequestParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for RequestParams {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// An HTTP request to be sent to the Graph API.
///
/// `path` is relative to the versioned base URL (`{base}v{version}/`). An empty
/// path targets the version root, which is where batch requests are posted.
///
/// # Example
///
/// ```rust
/// use meta_graph_api::clients::{HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/123/product_feeds")
///     .param("fields", "id,file_name,name")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.path, "123/product_feeds");
/// assert_eq!(request.params.get("fields"), Some("id,file_name,name"));
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path relative to the versioned base URL, without a leading `/`.
    pub path: String,
    /// The request envelope.
    pub params: RequestParams,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request path.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the path is an absolute URL or
    /// contains whitespace.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        verify_path(&self.path)
    }
}

pub(crate) fn verify_path(path: &str) -> Result<(), InvalidHttpRequestError> {
    if path.contains("://") {
        return Err(InvalidHttpRequestError::AbsolutePath {
            path: path.to_string(),
        });
    }
    if path.chars().any(char::is_whitespace) {
        return Err(InvalidHttpRequestError::WhitespaceInPath {
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Strips leading slashes so a path always resolves below the version segment.
pub(crate) fn normalize_path(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    params: RequestParams,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: normalize_path(&path.into()),
            params: RequestParams::new(),
        }
    }

    /// Replaces the whole envelope.
    #[must_use]
    pub fn params(mut self, params: RequestParams) -> Self {
        self.params = params;
        self
    }

    /// Adds a single parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            params: self.params,
        };
        request.verify()?;
        Ok(request)
    }
}
