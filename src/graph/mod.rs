//! The Graph API adapter.
//!
//! [`GraphApiAdapter`] translates commerce intents into Graph API calls and
//! hands back the decoded JSON. Operations are grouped by area:
//!
//! - pages and business onboarding (`pages`)
//! - catalogs, feeds and products (`catalog`)
//! - commerce orders (`orders`)
//! - seller logs (`seller_logs`)
//!
//! # Credentials
//!
//! The adapter is an immutable value built for one request context. Calls
//! use the configured user token unless the operation takes an explicit
//! token. To swap the held token, derive a new adapter with
//! [`GraphApiAdapter::with_access_token`].
//!
//! # Example
//!
//! ```rust,ignore
//! use meta_graph_api::{AccessToken, GraphApiAdapter, GraphApiConfig};
//! use meta_graph_api::graph::OrderFilter;
//!
//! let config = GraphApiConfig::builder()
//!     .access_token(AccessToken::new("EAAB...")?)
//!     .build()?;
//! let adapter = GraphApiAdapter::new(&config)?;
//!
//! let page = adapter.get_orders("1234", None, OrderFilter::Refunds).await?;
//! let cursor = meta_graph_api::graph::next_orders_cursor(&page);
//! ```

mod catalog;
mod errors;
mod idempotency;
mod orders;
mod pages;
mod seller_logs;
mod types;

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, RequestParams,
    ACCESS_TOKEN_PARAM,
};
use crate::config::{AccessToken, GraphApiConfig};

pub use crate::clients::DEFAULT_LOCALE;

pub use errors::GraphApiError;
pub use idempotency::{IdempotencyKey, IDEMPOTENCY_KEY_PARAM};
pub use orders::{next_orders_cursor, OrderFilter, GET_ORDERS_LIMIT, ORDER_LOOKBACK_DAYS};
pub use seller_logs::LogContext;
pub use types::{CommerceAccountData, FulfillmentAddress, RefundItem, ShipmentItem, TrackingInfo};

/// Client for the Meta Graph API commerce endpoints.
///
/// # Thread Safety
///
/// `GraphApiAdapter` is `Send + Sync` and cheap to clone.
#[derive(Clone, Debug)]
pub struct GraphApiAdapter {
    http_client: HttpClient,
    config: GraphApiConfig,
}

// Verify GraphApiAdapter is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphApiAdapter>();
};

impl GraphApiAdapter {
    /// Creates an adapter from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &GraphApiConfig) -> Result<Self, GraphApiError> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
            config: config.clone(),
        })
    }

    /// Returns the configuration this adapter was built from.
    #[must_use]
    pub const fn config(&self) -> &GraphApiConfig {
        &self.config
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns a new adapter that holds `token` as its user token.
    #[must_use]
    pub fn with_access_token(&self, token: AccessToken) -> Self {
        let mut config = self.config.clone();
        config.set_access_token(Some(token));
        Self {
            http_client: self.http_client.clone(),
            config,
        }
    }

    /// Returns a new adapter with debug logging switched on or off.
    #[must_use]
    pub fn with_debug_mode(&self, debug_mode: bool) -> Self {
        let mut config = self.config.clone();
        config.set_debug_mode(debug_mode);
        Self {
            http_client: self.http_client.with_debug_mode(debug_mode),
            config,
        }
    }

    /// Returns the Graph API version as used in URLs, e.g. `v15.0`.
    #[must_use]
    pub fn graph_api_version(&self) -> String {
        self.config.api_version().path_segment()
    }

    /// Issues one request and returns the raw response.
    ///
    /// The transport adds `locale` to `params`. Callers decode the body
    /// themselves.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError::Http`] for invalid paths, network failures and
    /// 4xx/5xx responses.
    pub async fn call_api(
        &self,
        method: HttpMethod,
        path: &str,
        params: RequestParams,
    ) -> Result<HttpResponse, GraphApiError> {
        let request = HttpRequest::builder(method, path)
            .params(params)
            .build()
            .map_err(HttpError::from)?;
        Ok(self.http_client.request(request).await?)
    }

    /// Issues one request and decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Same as [`call_api`](Self::call_api), plus [`GraphApiError::InvalidJson`]
    /// if the body cannot be decoded.
    pub async fn call_json(
        &self,
        method: HttpMethod,
        path: &str,
        params: RequestParams,
    ) -> Result<Value, GraphApiError> {
        let response = self.call_api(method, path, params).await?;
        response.json().map_err(|source| GraphApiError::InvalidJson {
            path: path.to_string(),
            source,
        })
    }

    /// Sends a caller-assembled batch in one request to the version root.
    ///
    /// Splitting work into batches is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held, the batch cannot be
    /// encoded, or the request fails.
    pub async fn graph_api_batch_request<T: Serialize + ?Sized + Sync>(
        &self,
        requests: &T,
    ) -> Result<Value, GraphApiError> {
        let mut params = self.authorized_params(None)?;
        params.insert_json("batch", requests)?;
        self.call_json(HttpMethod::Post, "", params).await
    }

    /// Picks the explicit token when given, else the held user token.
    fn resolve_token<'a>(
        &'a self,
        explicit: Option<&'a AccessToken>,
    ) -> Result<&'a AccessToken, GraphApiError> {
        explicit
            .or_else(|| self.config.access_token())
            .ok_or(GraphApiError::MissingAccessToken)
    }

    /// Starts an envelope carrying the resolved access token.
    fn authorized_params(
        &self,
        explicit: Option<&AccessToken>,
    ) -> Result<RequestParams, GraphApiError> {
        let token = self.resolve_token(explicit)?;
        let mut params = RequestParams::new();
        params.insert(ACCESS_TOKEN_PARAM, token.as_ref());
        Ok(params)
    }

    /// Uploads a file with the held user token.
    async fn transfer_file(
        &self,
        path: &str,
        params: RequestParams,
        file_path: &Path,
    ) -> Result<Value, GraphApiError> {
        let token = self.resolve_token(None)?;
        Ok(self
            .http_client
            .upload_file(path, &params, file_path, Some(token))
            .await?)
    }
}

/// Reads a string at a JSON pointer, accepting numeric IDs as well.
pub(crate) fn json_string(value: &Value, pointer: &str) -> Option<String> {
    match value.pointer(pointer)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Returns the `data` member of a response, or `null` when absent.
pub(crate) fn data_member(mut value: Value) -> Value {
    value.get_mut("data").map_or(Value::Null, Value::take)
}
