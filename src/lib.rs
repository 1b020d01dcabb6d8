//! # Meta Graph API Adapter
//!
//! A Rust adapter for the Meta Graph API endpoints used by a commerce
//! extension: page onboarding, catalogs and feeds, commerce orders and seller
//! logs.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`GraphApiConfig`] and [`GraphApiConfigBuilder`]
//! - Validated newtypes for access tokens, the Graph base URL and API versions
//! - An async HTTP transport with a fixed body/query placement policy,
//!   token-redacting debug logs and truncated error summaries
//! - [`GraphApiAdapter`], one method per Graph operation, returning decoded JSON
//! - Multipart feed uploads that fail with an explicit error
//!
//! ## Quick Start
//!
//! ```rust
//! use meta_graph_api::{AccessToken, GraphApiConfig, GraphApiVersion};
//!
//! let config = GraphApiConfig::builder()
//!     .access_token(AccessToken::new("EAAB...").unwrap())
//!     .api_version(GraphApiVersion::V15_0)
//!     .debug_mode(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.versioned_base_url(), "https://graph.facebook.com/v15.0/");
//! ```
//!
//! ## Making Calls
//!
//! ```rust,ignore
//! use meta_graph_api::{GraphApiAdapter, GraphApiConfig};
//!
//! let adapter = GraphApiAdapter::new(&config)?;
//!
//! let feed_id = adapter.create_empty_feed("123", "Main feed", false).await?;
//! if let Some(feed_id) = feed_id {
//!     adapter.push_feed(&feed_id, "/tmp/products.csv").await?;
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`] and never installs a subscriber. With
//! debug mode on, each request and response is emitted at `DEBUG` as one JSON
//! line, with the access token removed. Failed calls are logged at `ERROR`.
//!
//! ## Thread Safety
//!
//! All public types are `Send + Sync`. Adapters are immutable values: use
//! [`GraphApiAdapter::with_access_token`] to derive one with another token.

pub mod clients;
pub mod config;
pub mod error;
pub mod graph;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, GraphApiConfig, GraphApiConfigBuilder, GraphApiVersion, GraphBaseUrl,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    FileTransferError, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, HttpResponseError, InvalidHttpRequestError, RequestParams,
};

// Re-export adapter types
pub use graph::{GraphApiAdapter, GraphApiError, LogContext, OrderFilter};
