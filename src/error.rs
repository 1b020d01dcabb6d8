//! Error types for adapter configuration.
//!
//! This module contains error types used throughout the crate for
//! configuration and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use meta_graph_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the Graph API adapter.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Meta access token.")]
    EmptyAccessToken,

    /// Graph base URL is invalid.
    #[error("Invalid Graph base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://graph.facebook.com/').")]
    InvalidGraphBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid Graph API version '{version}'. Expected format: 'MAJOR.MINOR' (e.g., '15.0' or 'v15.0').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Request timeout must be positive.
    #[error("Invalid request timeout: the timeout must be greater than zero.")]
    InvalidTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_access_token_error_message() {
        let message = ConfigError::EmptyAccessToken.to_string();
        assert!(message.contains("Access token cannot be empty"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidGraphBaseUrl {
            url: "graph.facebook.com".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("graph.facebook.com"));
        assert!(message.contains("with scheme"));
    }

    #[test]
    fn test_invalid_version_error_message() {
        let error = ConfigError::InvalidApiVersion {
            version: "fifteen".to_string(),
        };
        assert!(error.to_string().contains("'fifteen'"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidTimeout;
        let _: &dyn std::error::Error = &error;
    }
}
