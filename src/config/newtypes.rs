//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An opaque Meta access token.
///
/// Both user-level and client-level tokens use this type. The only local
/// validation is that the token is non-empty; the Graph API is the authority
/// on whether a token is actually valid.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AccessToken(*****)`.
///
/// # Example
///
/// ```rust
/// use meta_graph_api::AccessToken;
///
/// let token = AccessToken::new("EAAB...").unwrap();
/// assert_eq!(token.as_ref(), "EAAB...");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty or
    /// only whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

impl Serialize for AccessToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AccessToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated Graph API base URL.
///
/// The URL must carry a scheme and a host. It is normalized to always end in
/// `/` so the version segment can be appended directly.
///
/// # Example
///
/// ```rust
/// use meta_graph_api::GraphBaseUrl;
///
/// let url = GraphBaseUrl::new("https://graph.facebook.com").unwrap();
/// assert_eq!(url.as_ref(), "https://graph.facebook.com/");
/// assert_eq!(url.host_name(), "graph.facebook.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphBaseUrl {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl GraphBaseUrl {
    /// The production Graph API host.
    pub const DEFAULT: &'static str = "https://graph.facebook.com/";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGraphBaseUrl`] if the URL has no scheme,
    /// no host, or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let mut url = url.into().trim().to_string();
        let invalid = |url: &str| ConfigError::InvalidGraphBaseUrl {
            url: url.to_string(),
        };

        let scheme_end = url.find("://").ok_or_else(|| invalid(&url))?;
        let scheme = &url[..scheme_end];
        if !matches!(scheme, "http" | "https") {
            return Err(invalid(&url));
        }
        if url.contains(['?', '#']) {
            return Err(invalid(&url));
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid(&url));
        }

        if !url.ends_with('/') {
            url.push('/');
        }

        Ok(Self {
            url,
            host_start,
            host_end,
        })
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for GraphBaseUrl {
    fn default() -> Self {
        let host_start = "https://".len();
        Self {
            url: Self::DEFAULT.to_string(),
            host_start,
            host_end: Self::DEFAULT.len() - 1,
        }
    }
}

impl AsRef<str> for GraphBaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for GraphBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
