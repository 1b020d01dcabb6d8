//! HTTP-specific error types for the Graph API adapter.
//!
//! This module contains error types for HTTP operations, including response
//! errors, request validation failures and file transfer failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the Graph API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type for the generic call path
//! - [`FileTransferError`]: Failures of multipart feed uploads
//!
//! No error in this module is retried by the crate. Any resilience policy
//! belongs to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use meta_graph_api::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a request receives a 4xx or 5xx response.
///
/// `message` is a short summary with the body cut to a fixed length and a
/// `(truncated...)` marker; `body` always holds the complete response text.
///
/// # Example
///
/// ```rust
/// use meta_graph_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 400,
///     message: "Client error: `GET me/accounts` resulted in a `400 Bad Request` response".to_string(),
///     body: r#"{"error":{"message":"Invalid OAuth access token."}}"#.to_string(),
///     error_reference: Some("AbCdEf".to_string()),
/// };
///
/// assert_eq!(error.code, 400);
/// assert!(error.to_string().contains("400 Bad Request"));
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Summary message, with the body excerpt possibly truncated.
    pub message: String,
    /// The complete response body.
    pub body: String,
    /// Reference ID for error reporting (from the `x-fb-trace-id` header).
    pub error_reference: Option<String>,
}

impl HttpResponseError {
    /// Returns `true` if the summary message had to truncate the body.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.message.to_lowercase().contains("truncated")
    }
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is an absolute URL rather than a Graph path.
    #[error("Invalid Graph API path '{path}': paths must be relative to the versioned base URL.")]
    AbsolutePath {
        /// The rejected path.
        path: String,
    },

    /// The request path contains whitespace.
    #[error("Invalid Graph API path '{path}': paths cannot contain whitespace.")]
    WhitespaceInPath {
        /// The rejected path.
        path: String,
    },
}

/// Unified error type for the generic call path.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network, timeout or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Error returned by the multipart file transfer path.
#[derive(Debug, Error)]
pub enum FileTransferError {
    /// The file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        /// The path that was being uploaded.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The request could not be sent or the response could not be read.
    #[error("File transfer failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The Graph API rejected the upload with a 4xx or 5xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The response body was not valid JSON.
    #[error("File transfer returned a non-JSON response (status {code}): {body}")]
    Decode {
        /// The HTTP status code of the response.
        code: u16,
        /// The raw response body.
        body: String,
    },

    /// The request path failed validation.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_displays_message() {
        let error = HttpResponseError {
            code: 404,
            message: "Client error: `GET 123` resulted in a `404 Not Found` response".to_string(),
            body: "{}".to_string(),
            error_reference: None,
        };
        assert_eq!(
            error.to_string(),
            "Client error: `GET 123` resulted in a `404 Not Found` response"
        );
        assert!(!error.is_truncated());
    }

    #[test]
    fn test_http_response_error_detects_truncation() {
        let error = HttpResponseError {
            code: 500,
            message: "Server error: ... response: {\"error\" (Truncated...)".to_string(),
            body: "{\"error\":{}}".to_string(),
            error_reference: Some("trace".to_string()),
        };
        assert!(error.is_truncated());
    }

    #[test]
    fn test_invalid_request_error_messages() {
        let error = InvalidHttpRequestError::AbsolutePath {
            path: "https://evil.example/".to_string(),
        };
        assert!(error.to_string().contains("relative"));

        let error = InvalidHttpRequestError::WhitespaceInPath {
            path: "12 3".to_string(),
        };
        assert!(error.to_string().contains("whitespace"));
    }

    #[test]
    fn test_file_transfer_io_error_mentions_path() {
        let error = FileTransferError::Io {
            path: PathBuf::from("/tmp/missing-feed.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let message = error.to_string();
        assert!(message.contains("/tmp/missing-feed.csv"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let http_error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            message: "test".to_string(),
            body: String::new(),
            error_reference: None,
        };
        let _ = http_error;

        let decode_error: &dyn std::error::Error = &FileTransferError::Decode {
            code: 200,
            body: "oops".to_string(),
        };
        let _ = decode_error;
    }
}
