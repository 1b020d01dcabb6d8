//! Seller log persistence.
//!
//! Extension events and exceptions are reported to the `commerce_seller_logs`
//! edge so they show up in Meta's seller tooling.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{GraphApiAdapter, GraphApiError};
use crate::clients::{HttpMethod, RequestParams, ACCESS_TOKEN_PARAM};

/// Marker added to `extra_data` when the client token had to be used.
pub const CLIENT_TOKEN_MARKER: (&str, &str) = ("access_token_used", "client");

/// A log entry for [`GraphApiAdapter::persist_log_to_meta`].
///
/// Unset fields are not sent.
///
/// # Example
///
/// ```rust
/// use meta_graph_api::graph::LogContext;
///
/// let context = LogContext {
///     event: Some("order_sync".to_string()),
///     exception_message: Some("timeout".to_string()),
///     exception_code: Some(28),
///     ..LogContext::default()
/// };
/// assert!(context.extra_data.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LogContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commerce_merchant_settings_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_trace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_step: Option<String>,
    /// Request parameters that led to the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming_params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_platform_app_version: Option<String>,
    /// Free-form details.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extra_data: Map<String, Value>,
}

impl LogContext {
    /// Flattens the entry into request parameters.
    ///
    /// Strings and numbers are sent as-is; compound values as JSON.
    fn into_params(self) -> Result<RequestParams, GraphApiError> {
        let Value::Object(fields) = serde_json::to_value(self)? else {
            return Ok(RequestParams::new());
        };
        let mut params = RequestParams::new();
        for (key, value) in fields {
            match value {
                Value::String(s) => params.insert(key, s),
                Value::Number(n) => params.insert(key, n),
                other => params.insert_json(key, &other)?,
            }
        }
        Ok(params)
    }
}

impl GraphApiAdapter {
    /// Reports a log entry to Meta.
    ///
    /// Uses the user token when one is held, otherwise the client token; in
    /// the latter case `extra_data.access_token_used` is set to `client`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError::MissingAccessToken`] if neither token is
    /// configured, or another [`GraphApiError`] if the request fails.
    pub async fn persist_log_to_meta(
        &self,
        mut context: LogContext,
    ) -> Result<Value, GraphApiError> {
        let token = match (self.config.access_token(), self.config.client_access_token()) {
            (Some(token), _) => token,
            (None, Some(client_token)) => {
                let (key, value) = CLIENT_TOKEN_MARKER;
                context.extra_data.insert(key.to_string(), Value::from(value));
                client_token
            }
            (None, None) => return Err(GraphApiError::MissingAccessToken),
        };

        let mut params = context.into_params()?;
        params.insert(ACCESS_TOKEN_PARAM, token.as_ref());
        self.call_json(HttpMethod::Post, "commerce_seller_logs", params)
            .await
    }
}
