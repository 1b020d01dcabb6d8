//! HTTP transport types for Graph API communication.
//!
//! This module provides the transport layer the
//! [`GraphApiAdapter`](crate::graph::GraphApiAdapter) is built on. It handles
//! request envelopes, the body/query placement policy, debug logging and
//! error summaries.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`RequestParams`]: The flat parameter envelope of a request
//! - [`HttpResponse`]: A raw response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, DELETE)
//! - [`GraphErrorInfo`]: The `error` object of a Graph error body
//!
//! # Example
//!
//! ```rust,ignore
//! use meta_graph_api::GraphApiConfig;
//! use meta_graph_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(&GraphApiConfig::builder().build()?)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "123/product_feeds")
//!     .param("access_token", "EAAB...")
//!     .param("fields", "id,name")
//!     .build()?;
//!
//! let response = client.request(request).await?;
//! let feeds = response.json()?;
//! ```
//!
//! # Retry Behavior
//!
//! None. Every call issues exactly one request. Errors are logged and handed
//! back to the caller, who owns any retry policy.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{FileTransferError, HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, DEFAULT_LOCALE, ERROR_SUMMARY_LENGTH, SDK_VERSION};
pub use http_request::{
    HttpMethod, HttpRequest, HttpRequestBuilder, RequestParams, ACCESS_TOKEN_PARAM,
};
pub use http_response::{GraphErrorInfo, HttpResponse};
