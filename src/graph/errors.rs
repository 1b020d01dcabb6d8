//! Error type for Graph API adapter operations.
//!
//! Every adapter operation returns `Result<T, GraphApiError>`. Transport and
//! file transfer failures share this one type, so a failed feed upload is an
//! `Err` exactly like a failed order call.

use thiserror::Error;

use crate::clients::{FileTransferError, HttpError};

/// Error type for Graph API adapter operations.
///
/// # Example
///
/// ```rust
/// use meta_graph_api::graph::GraphApiError;
///
/// let error = GraphApiError::MissingAccessToken;
/// assert!(error.to_string().contains("access token"));
/// ```
#[derive(Debug, Error)]
pub enum GraphApiError {
    /// An HTTP-level error occurred on the generic call path.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A multipart file transfer failed.
    #[error(transparent)]
    FileTransfer(#[from] FileTransferError),

    /// The call needs an access token and none was configured or supplied.
    #[error("No access token is available for this call. Configure an access token or pass one explicitly.")]
    MissingAccessToken,

    /// An argument was rejected before any request was sent.
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// The name of the rejected argument.
        argument: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A compound parameter could not be serialized to JSON.
    #[error("Failed to encode request parameter: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A successful response body was not valid JSON.
    #[error("Response from '{path}' is not valid JSON: {source}")]
    InvalidJson {
        /// The path that was called.
        path: String,
        /// The decoding error.
        #[source]
        source: serde_json::Error,
    },
}

impl GraphApiError {
    /// Returns the HTTP status code if the Graph API answered with an error response.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(HttpError::Response(e)) | Self::FileTransfer(FileTransferError::Response(e)) => {
                Some(e.code)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_status_code_from_http_response_error() {
        let error = GraphApiError::Http(HttpError::Response(HttpResponseError {
            code: 403,
            message: "Client error".to_string(),
            body: String::new(),
            error_reference: None,
        }));
        assert_eq!(error.status_code(), Some(403));
    }

    #[test]
    fn test_status_code_from_file_transfer_rejection() {
        let error = GraphApiError::FileTransfer(FileTransferError::Response(HttpResponseError {
            code: 400,
            message: "Client error".to_string(),
            body: String::new(),
            error_reference: None,
        }));
        assert_eq!(error.status_code(), Some(400));
    }

    #[test]
    fn test_status_code_absent_for_local_errors() {
        assert_eq!(GraphApiError::MissingAccessToken.status_code(), None);
        let error = GraphApiError::InvalidArgument {
            argument: "order_ids",
            reason: "empty".to_string(),
        };
        assert_eq!(error.status_code(), None);
        assert!(error.to_string().contains("order_ids"));
    }

    #[test]
    fn test_wraps_http_errors_transparently() {
        let error: GraphApiError = HttpError::Response(HttpResponseError {
            code: 404,
            message: "Client error: not found".to_string(),
            body: String::new(),
            error_reference: None,
        })
        .into();
        assert_eq!(error.to_string(), "Client error: not found");
    }
}
