//! Commerce order operations.
//!
//! Reads (orders, refunds, cancellations, items) and the mutating order
//! lifecycle calls. Every mutating call carries a fresh [`IdempotencyKey`].
//!
//! Request envelopes are assembled by pure functions so their rules can be
//! checked without a server.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use super::{data_member, GraphApiAdapter, GraphApiError, IdempotencyKey, IDEMPOTENCY_KEY_PARAM};
use crate::clients::{HttpMethod, RequestParams};
use crate::graph::{FulfillmentAddress, TrackingInfo};

/// Page size of order listings.
pub const GET_ORDERS_LIMIT: u32 = 25;

/// Orders last updated longer ago than this are not listed.
pub const ORDER_LOOKBACK_DAYS: i64 = 180;

const ORDER_FIELDS: &[&str] = &[
    "id",
    "buyer_details",
    "channel",
    "created",
    "estimated_payment_details",
    "ship_by_date",
    "order_status",
    "selected_shipping_option",
    "shipping_address{first_name, last_name, street1, street2, city, postal_code, country}",
    "payments",
    "promotion_details{applied_amount, coupon_code, target_granularity, sponsor, campaign_name}",
    "last_updated",
];

const REFUND_FIELDS: &[&str] = &[
    "id",
    "items{product_id,retailer_id,refund_subtotal,quantity}",
    "refund_reason",
    "refund_amount{subtotal,shipping,tax,total,amount,currency}",
];

const ORDER_ITEM_FIELDS: &[&str] = &[
    "retailer_id",
    "quantity",
    "price_per_unit",
    "tax_details",
    "product_id",
    "promotion_details",
];

const OPEN_ORDER_STATES: &str = "CREATED,IN_PROGRESS,COMPLETED";
const CANCEL_REASON_CODE: &str = "CUSTOMER_REQUESTED";
const CANCEL_REASON_DESCRIPTION: &str = "Cancelled from Magento";
const REFUND_REASON_CODE: &str = "REFUND_REASON_OTHER";
const RETURN_SHIPPING_DEDUCTION: &str = "RETURN_SHIPPING";

/// Narrows an order listing to orders with refunds or cancellations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OrderFilter {
    /// All orders.
    #[default]
    None,
    /// Orders that have refunds.
    Refunds,
    /// Orders that have cancellations.
    Cancellations,
}

impl OrderFilter {
    /// Returns the Graph `filters` value, if any.
    #[must_use]
    pub const fn graph_filter(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Refunds => Some("has_refunds"),
            Self::Cancellations => Some("has_cancellations"),
        }
    }
}

impl fmt::Display for OrderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str(""),
            Self::Refunds => f.write_str("refunds"),
            Self::Cancellations => f.write_str("cancellations"),
        }
    }
}

impl FromStr for OrderFilter {
    type Err = GraphApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::None),
            "refunds" => Ok(Self::Refunds),
            "cancellations" => Ok(Self::Cancellations),
            other => Err(GraphApiError::InvalidArgument {
                argument: "filter",
                reason: format!("unknown order filter '{other}'"),
            }),
        }
    }
}

/// Returns the cursor of the next page of an order listing.
///
/// `None` when the listing has no further page.
#[must_use]
pub fn next_orders_cursor(page: &Value) -> Option<String> {
    page.pointer("/paging/next")?;
    page.pointer("/paging/cursors/after")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Builds the query of an order listing, without the access token.
pub(crate) fn orders_query(
    filter: OrderFilter,
    cursor_after: Option<&str>,
    now: DateTime<Utc>,
) -> RequestParams {
    let mut params = RequestParams::new();
    params.insert("fields", ORDER_FIELDS.join(","));
    params.insert("limit", GET_ORDERS_LIMIT);
    if let Some(filters) = filter.graph_filter() {
        params.insert("state", OPEN_ORDER_STATES);
        params.insert("filters", filters);
    }
    let updated_after = now - Duration::days(ORDER_LOOKBACK_DAYS);
    params.insert("updated_after", updated_after.timestamp());
    if let Some(cursor) = cursor_after.filter(|cursor| !cursor.is_empty()) {
        params.insert("after", cursor);
    }
    params
}

/// Builds the `orders` list of an acknowledgement.
pub(crate) fn acknowledgement_entries(order_ids: &BTreeMap<String, String>) -> Value {
    order_ids
        .iter()
        .map(|(local_id, remote_id)| {
            json!({ "id": remote_id, "merchant_order_reference": local_id })
        })
        .collect()
}

/// Builds the shipment parameters, without token and idempotency key.
pub(crate) fn shipment_params<I: Serialize + ?Sized>(
    items: &I,
    tracking_info: &TrackingInfo,
    fulfillment_address: Option<&FulfillmentAddress>,
) -> Result<RequestParams, GraphApiError> {
    let mut params = RequestParams::new();
    params.insert_json("items", items)?;
    params.insert_json("tracking_info", tracking_info)?;
    match fulfillment_address {
        Some(address) => {
            params.insert("should_use_default_fulfillment_location", false);
            params.insert_json("fulfillment", &json!({ "fulfillment_address": address }))?;
        }
        None => params.insert("should_use_default_fulfillment_location", true),
    }
    Ok(params)
}

/// Builds the refund parameters, without token and idempotency key.
///
/// `deductions` is only sent for a positive deduction amount.
pub(crate) fn refund_params<I: Serialize + ?Sized>(
    items: &I,
    shipping_refund_amount: f64,
    deduction_amount: f64,
    currency: &str,
    reason_text: Option<&str>,
) -> Result<RequestParams, GraphApiError> {
    let mut params = RequestParams::new();
    params.insert("reason_code", REFUND_REASON_CODE);
    if let Some(text) = reason_text.filter(|text| !text.is_empty()) {
        params.insert("reason_text", text);
    }
    params.insert_json("items", items)?;
    params.insert_json(
        "shipping",
        &json!({
            "shipping_refund": { "amount": shipping_refund_amount, "currency": currency }
        }),
    )?;
    if deduction_amount > 0.0 {
        params.insert_json(
            "deductions",
            &json!([{
                "deduction_type": RETURN_SHIPPING_DEDUCTION,
                "deduction_amount": { "amount": deduction_amount, "currency": currency }
            }]),
        )?;
    }
    Ok(params)
}

impl GraphApiAdapter {
    /// Lists one page of orders of a page, updated in the last 180 days.
    ///
    /// Pass the cursor from [`next_orders_cursor`] to fetch the next page.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn get_orders(
        &self,
        page_id: &str,
        cursor_after: Option<&str>,
        filter: OrderFilter,
    ) -> Result<Value, GraphApiError> {
        let mut params = self.authorized_params(None)?;
        params.extend(orders_query(filter, cursor_after, Utc::now()));
        let path = format!("{page_id}/commerce_orders");
        self.call_json(HttpMethod::Get, &path, params).await
    }

    /// Lists the refunds of an order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn get_refunds(&self, order_id: &str) -> Result<Value, GraphApiError> {
        let mut params = self.authorized_params(None)?;
        params.insert("fields", REFUND_FIELDS.join(","));
        let path = format!("{order_id}/refunds");
        let response = self.call_json(HttpMethod::Get, &path, params).await?;
        Ok(data_member(response))
    }

    /// Lists the cancellations of an order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn get_cancellations(&self, order_id: &str) -> Result<Value, GraphApiError> {
        let params = self.authorized_params(None)?;
        let path = format!("{order_id}/cancellations");
        let response = self.call_json(HttpMethod::Get, &path, params).await?;
        Ok(data_member(response))
    }

    /// Lists the items of an order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn get_order_items(&self, fb_order_id: &str) -> Result<Value, GraphApiError> {
        let mut params = self.authorized_params(None)?;
        params.insert("fields", ORDER_ITEM_FIELDS.join(","));
        let path = format!("{fb_order_id}/items");
        self.call_json(HttpMethod::Get, &path, params).await
    }

    /// Acknowledges orders, linking each to its local order reference.
    ///
    /// `order_ids` maps local order references to Meta order IDs.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError::InvalidArgument`] for an empty map, or another
    /// [`GraphApiError`] if no token is held or the request fails.
    pub async fn acknowledge_orders(
        &self,
        page_id: &str,
        order_ids: &BTreeMap<String, String>,
    ) -> Result<Value, GraphApiError> {
        if order_ids.is_empty() {
            return Err(GraphApiError::InvalidArgument {
                argument: "order_ids",
                reason: "at least one order is required".to_string(),
            });
        }
        let mut params = self.mutation_params()?;
        params.insert_json("orders", &acknowledgement_entries(order_ids))?;
        let path = format!("{page_id}/acknowledge_orders");
        self.call_json(HttpMethod::Post, &path, params).await
    }

    /// Marks items of an order as shipped.
    ///
    /// Without a fulfillment address the page's default fulfillment location
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held, a field cannot be
    /// encoded, or the request fails.
    pub async fn mark_order_as_shipped<I: Serialize + ?Sized + Sync>(
        &self,
        fb_order_id: &str,
        items: &I,
        tracking_info: &TrackingInfo,
        fulfillment_address: Option<&FulfillmentAddress>,
    ) -> Result<Value, GraphApiError> {
        let mut params = self.mutation_params()?;
        params.extend(shipment_params(items, tracking_info, fulfillment_address)?);
        let path = format!("{fb_order_id}/shipments");
        self.call_json(HttpMethod::Post, &path, params).await
    }

    /// Cancels an order on behalf of the customer and restocks its items.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held or the request fails.
    pub async fn cancel_order(&self, fb_order_id: &str) -> Result<Value, GraphApiError> {
        let mut params = self.mutation_params()?;
        params.insert_json(
            "cancel_reason",
            &json!({
                "reason_code": CANCEL_REASON_CODE,
                "reason_description": CANCEL_REASON_DESCRIPTION,
            }),
        )?;
        params.insert("restock_items", true);
        let path = format!("{fb_order_id}/cancellations");
        self.call_json(HttpMethod::Post, &path, params).await
    }

    /// Refunds items and shipping of an order.
    ///
    /// A positive `deduction_amount` is withheld as a return shipping
    /// deduction.
    ///
    /// # Errors
    ///
    /// Returns [`GraphApiError`] if no token is held, a field cannot be
    /// encoded, or the request fails.
    pub async fn refund_order<I: Serialize + ?Sized + Sync>(
        &self,
        fb_order_id: &str,
        items: &I,
        shipping_refund_amount: f64,
        deduction_amount: f64,
        currency: &str,
        reason_text: Option<&str>,
    ) -> Result<Value, GraphApiError> {
        let mut params = self.mutation_params()?;
        params.extend(refund_params(
            items,
            shipping_refund_amount,
            deduction_amount,
            currency,
            reason_text,
        )?);
        let path = format!("{fb_order_id}/refunds");
        self.call_json(HttpMethod::Post, &path, params).await
    }

    /// Starts a mutating envelope: token plus a fresh idempotency key.
    fn mutation_params(&self) -> Result<RequestParams, GraphApiError> {
        let mut params = self.authorized_params(None)?;
        params.insert(IDEMPOTENCY_KEY_PARAM, IdempotencyKey::generate());
        Ok(params)
    }
}
