//! HTTP client for Graph API communication.
//!
//! This module provides the [`HttpClient`] type, which owns the transport and
//! applies the fixed request policy of the adapter:
//!
//! - POST parameters travel in a form-encoded body, every other verb puts
//!   them in the query string
//! - A single timeout applies uniformly to every call
//! - Failed calls (4xx/5xx) are logged and returned; nothing is retried
//! - In debug mode every request (token removed) and response is logged as a
//!   JSON line
//! - `locale` is appended to the parameters after the request is logged
//! - Transport errors never carry the request URL, which may hold the token

use std::collections::HashMap;
use std::path::Path;

use serde_json::json;

use crate::clients::errors::{FileTransferError, HttpError, HttpResponseError};
use crate::clients::http_request::{
    normalize_path, verify_path, HttpMethod, HttpRequest, RequestParams, ACCESS_TOKEN_PARAM,
};
use crate::clients::http_response::HttpResponse;
use crate::config::{AccessToken, GraphApiConfig, GraphApiVersion};

const LOCALE_PARAM: &str = "locale";

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Locale sent with every [`HttpClient::request`] call.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Number of body characters quoted in an error summary.
pub const ERROR_SUMMARY_LENGTH: usize = 120;

/// HTTP client for making requests to the Graph API.
///
/// `HttpClient` is cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use meta_graph_api::GraphApiConfig;
/// use meta_graph_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = GraphApiConfig::builder().build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "me/accounts")
///     .param("access_token", "EAAB...")
///     .build()?;
///
/// let response = client.request(request).await?;
/// println!("{}", response.body);
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Versioned API root (e.g., `https://graph.facebook.com/v15.0/`).
    base_url: String,
    /// Version requests are addressed to.
    api_version: GraphApiVersion,
    /// Whether request/response pairs are logged.
    debug_mode: bool,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the adapter configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &GraphApiConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Meta Graph API Adapter v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.versioned_base_url(),
            api_version: config.api_version(),
            debug_mode: config.debug_mode(),
            default_headers,
        })
    }

    /// Returns the versioned API root for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns whether debug logging is enabled.
    #[must_use]
    pub const fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Returns a copy of this client with debug logging switched on or off.
    #[must_use]
    pub fn with_debug_mode(&self, debug_mode: bool) -> Self {
        Self {
            debug_mode,
            ..self.clone()
        }
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the absolute URL for a path relative to the versioned root.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, normalize_path(path))
    }

    /// Sends a request to the Graph API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network or timeout error occurs (`Network`)
    /// - A 4xx or 5xx response is received (`Response`)
    pub async fn request(&self, mut request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;
        let url = self.endpoint_url(&request.path);

        if self.debug_mode {
            tracing::debug!(
                "{}",
                json!({
                    "endpoint": format!("/{} {}", request.http_method, request.path),
                    "request": request.params.redacted(),
                })
            );
        }
        request.params.insert(LOCALE_PARAM, DEFAULT_LOCALE);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = if request.http_method.sends_body() {
            req_builder.form(&request.params)
        } else {
            req_builder.query(&request.params)
        };

        let sent = req_builder.send().await.map_err(reqwest::Error::without_url)?;
        let response = Self::read_response(sent).await?;

        if self.debug_mode {
            tracing::debug!(
                "{}",
                json!({
                    "response": {
                        "status_code": response.code,
                        "reason_phrase": response.reason_phrase,
                        "headers": response.header_summary(),
                        "body": response.body,
                    }
                })
            );
        }
        self.warn_on_version_mismatch(&request.path, &response);

        if response.code >= 400 {
            return Err(Self::response_error(request.http_method, &request.path, &response).into());
        }
        Ok(response)
    }

    /// Uploads a file as a multipart POST and decodes the JSON response.
    ///
    /// `params` and `access_token` are sent as text parts alongside a `file`
    /// part named after the file's base name.
    ///
    /// # Errors
    ///
    /// Returns [`FileTransferError`] if the file cannot be read, the request
    /// fails, the Graph API rejects the upload, or the body is not JSON.
    pub async fn upload_file(
        &self,
        path: &str,
        params: &RequestParams,
        file_path: &Path,
        access_token: Option<&AccessToken>,
    ) -> Result<serde_json::Value, FileTransferError> {
        let path = normalize_path(path);
        verify_path(&path)?;
        let url = self.endpoint_url(&path);

        let result = self.send_file(&url, params, file_path, access_token).await;

        if self.debug_mode {
            let logged = match &result {
                Ok(response) => response.body.clone(),
                Err(e) => e.to_string(),
            };
            tracing::debug!(
                "{}",
                json!({
                    "endpoint": format!("POST {url}"),
                    "file": file_path.display().to_string(),
                    "response": logged,
                })
            );
        }

        let response = result?;
        if response.code >= 400 {
            return Err(Self::response_error(HttpMethod::Post, &path, &response).into());
        }
        serde_json::from_str(&response.body).map_err(|_| FileTransferError::Decode {
            code: response.code,
            body: response.body,
        })
    }

    async fn send_file(
        &self,
        url: &str,
        params: &RequestParams,
        file_path: &Path,
        access_token: Option<&AccessToken>,
    ) -> Result<HttpResponse, FileTransferError> {
        let contents = tokio::fs::read(file_path)
            .await
            .map_err(|source| FileTransferError::Io {
                path: file_path.to_path_buf(),
                source,
            })?;

        let file_name = file_path
            .file_name()
            .map_or_else(|| "upload".to_string(), |name| name.to_string_lossy().into_owned());
        let file_part = reqwest::multipart::Part::bytes(contents)
            .file_name(file_name)
            .mime_str(mime_type_for(file_path))?;

        let mut form = reqwest::multipart::Form::new();
        for (key, value) in params.iter() {
            form = form.text(key.to_string(), value.to_string());
        }
        if let Some(token) = access_token {
            form = form.text(ACCESS_TOKEN_PARAM, token.as_ref().to_string());
        }
        form = form.part("file", file_part);

        let mut req_builder = self.client.post(url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        let response = req_builder
            .multipart(form)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        Ok(Self::read_response(response).await?)
    }

    async fn read_response(response: reqwest::Response) -> Result<HttpResponse, reqwest::Error> {
        let status = response.status();
        let headers = Self::parse_response_headers(response.headers());
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        Ok(HttpResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            headers,
            body,
        ))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn warn_on_version_mismatch(&self, path: &str, response: &HttpResponse) {
        let Some(served) = response.served_api_version() else {
            return;
        };
        let requested = self.api_version.path_segment();
        if served != requested {
            tracing::warn!(
                "Graph API request to {} was addressed to {} but served by {}",
                path,
                requested,
                served
            );
        }
    }

    /// Builds and logs the error for a 4xx/5xx response.
    ///
    /// When the summary had to cut the body, the complete body is logged too.
    fn response_error(method: HttpMethod, path: &str, response: &HttpResponse) -> HttpResponseError {
        let kind = if response.code >= 500 {
            "Server error"
        } else {
            "Client error"
        };
        let message = format!(
            "{kind}: `{method} {path}` resulted in a `{} {}` response:\n{}",
            response.code,
            response.reason_phrase,
            summarize_body(&response.body)
        );

        let error = HttpResponseError {
            code: response.code,
            message,
            body: response.body.clone(),
            error_reference: response.trace_id().map(String::from),
        };

        tracing::error!("{}", error.message);
        if error.is_truncated() {
            tracing::error!("Full error: {}", error.body);
        }
        error
    }
}

/// Cuts a response body down to [`ERROR_SUMMARY_LENGTH`] characters.
fn summarize_body(body: &str) -> String {
    if body.chars().count() <= ERROR_SUMMARY_LENGTH {
        return body.to_string();
    }
    let excerpt: String = body.chars().take(ERROR_SUMMARY_LENGTH).collect();
    format!("{excerpt} (truncated...)")
}

/// Guesses the MIME type of a feed file from its extension.
fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());
    match extension.as_deref() {
        Some("csv") => "text/csv",
        Some("tsv") => "text/tab-separated-values",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("gz") => "application/gzip",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
