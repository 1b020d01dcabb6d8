//! Configuration types for the Graph API adapter.
//!
//! This module provides the configuration used to construct a
//! [`GraphApiAdapter`](crate::graph::GraphApiAdapter).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GraphApiConfig`]: The configuration struct holding credentials and transport settings
//! - [`GraphApiConfigBuilder`]: A builder for constructing [`GraphApiConfig`] instances
//! - [`AccessToken`]: An opaque access token with masked debug output
//! - [`GraphBaseUrl`]: A validated Graph API base URL
//! - [`GraphApiVersion`]: The Graph API version to use
//!
//! Credentials, the debug flag and the base-URL override are owned by the
//! host application's store configuration; this module only carries them.
//!
//! # Example
//!
//! ```rust
//! use meta_graph_api::{AccessToken, GraphApiConfig};
//!
//! let config = GraphApiConfig::builder()
//!     .access_token(AccessToken::new("user-token").unwrap())
//!     .client_access_token(AccessToken::new("app-id|client-token").unwrap())
//!     .debug_mode(true)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.debug_mode());
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{AccessToken, GraphBaseUrl};
pub use version::GraphApiVersion;

use crate::error::ConfigError;

/// Default per-request timeout, applied uniformly to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the Graph API adapter.
///
/// # Thread Safety
///
/// `GraphApiConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use meta_graph_api::{GraphApiConfig, GraphApiVersion, GraphBaseUrl};
///
/// let config = GraphApiConfig::builder()
///     .graph_base_url(GraphBaseUrl::new("https://graph.example.test").unwrap())
///     .api_version(GraphApiVersion::new(17, 0))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.graph_base_url().as_ref(), "https://graph.example.test/");
/// ```
#[derive(Clone, Debug)]
pub struct GraphApiConfig {
    access_token: Option<AccessToken>,
    client_access_token: Option<AccessToken>,
    graph_base_url: GraphBaseUrl,
    api_version: GraphApiVersion,
    debug_mode: bool,
    timeout: Duration,
    extension_base_url: Option<String>,
    user_agent_prefix: Option<String>,
}

impl GraphApiConfig {
    /// Creates a new builder for constructing a `GraphApiConfig`.
    #[must_use]
    pub fn builder() -> GraphApiConfigBuilder {
        GraphApiConfigBuilder::new()
    }

    /// Returns the user-level access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the client-level fallback token, if configured.
    #[must_use]
    pub const fn client_access_token(&self) -> Option<&AccessToken> {
        self.client_access_token.as_ref()
    }

    /// Returns the Graph API base URL.
    #[must_use]
    pub const fn graph_base_url(&self) -> &GraphBaseUrl {
        &self.graph_base_url
    }

    /// Returns the Graph API version.
    #[must_use]
    pub const fn api_version(&self) -> GraphApiVersion {
        self.api_version
    }

    /// Returns whether request/response debug logging is enabled.
    #[must_use]
    pub const fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the commerce extension base URL override, if configured.
    #[must_use]
    pub fn extension_base_url(&self) -> Option<&str> {
        self.extension_base_url.as_deref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the versioned API root, e.g. `https://graph.facebook.com/v15.0/`.
    #[must_use]
    pub fn versioned_base_url(&self) -> String {
        format!("{}{}/", self.graph_base_url, self.api_version.path_segment())
    }

    pub(crate) fn set_access_token(&mut self, token: Option<AccessToken>) {
        self.access_token = token;
    }

    pub(crate) fn set_debug_mode(&mut self, debug_mode: bool) {
        self.debug_mode = debug_mode;
    }
}

// Verify GraphApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphApiConfig>();
};

/// Builder for constructing [`GraphApiConfig`] instances.
///
/// # Defaults
///
/// - `access_token`: `None`
/// - `client_access_token`: `None`
/// - `graph_base_url`: `https://graph.facebook.com/`
/// - `api_version`: `15.0`
/// - `debug_mode`: `false`
/// - `timeout`: 60 seconds
/// - `extension_base_url`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct GraphApiConfigBuilder {
    access_token: Option<AccessToken>,
    client_access_token: Option<AccessToken>,
    graph_base_url: Option<GraphBaseUrl>,
    api_version: Option<GraphApiVersion>,
    debug_mode: Option<bool>,
    timeout: Option<Duration>,
    extension_base_url: Option<String>,
    user_agent_prefix: Option<String>,
}

impl GraphApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user-level access token.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the client-level access token used when no user token is held.
    #[must_use]
    pub fn client_access_token(mut self, token: AccessToken) -> Self {
        self.client_access_token = Some(token);
        self
    }

    /// Overrides the Graph API base URL.
    #[must_use]
    pub fn graph_base_url(mut self, url: GraphBaseUrl) -> Self {
        self.graph_base_url = Some(url);
        self
    }

    /// Sets the Graph API version.
    #[must_use]
    pub const fn api_version(mut self, version: GraphApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Enables or disables request/response debug logging.
    #[must_use]
    pub const fn debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = Some(debug_mode);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the base URL that replaces the commerce partner hub host in
    /// extension iframe URLs.
    #[must_use]
    pub fn extension_base_url(mut self, url: impl Into<String>) -> Self {
        self.extension_base_url = Some(url.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`GraphApiConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if a zero timeout was set.
    pub fn build(self) -> Result<GraphApiConfig, ConfigError> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(GraphApiConfig {
            access_token: self.access_token,
            client_access_token: self.client_access_token,
            graph_base_url: self.graph_base_url.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_default(),
            debug_mode: self.debug_mode.unwrap_or(false),
            timeout,
            extension_base_url: self.extension_base_url.filter(|url| !url.is_empty()),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
