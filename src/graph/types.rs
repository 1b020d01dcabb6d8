//! Typed inputs and outputs for adapter operations.
//!
//! Operations that send compound fields accept anything `Serialize`; the
//! structs here are ready-made shapes for the common cases.

use serde::{Deserialize, Serialize};

/// Page and catalog linked to a commerce account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommerceAccountData {
    /// ID of the merchant page, if linked.
    pub page_id: Option<String>,
    /// ID of the first product catalog, if any.
    pub catalog_id: Option<String>,
}

/// A line of a shipment: which item and how many units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentItem {
    /// The merchant's item identifier.
    pub retailer_id: String,
    /// Units shipped.
    pub quantity: u32,
}

/// Carrier tracking details for a shipment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingInfo {
    /// Carrier tracking number.
    pub tracking_number: String,
    /// Carrier code, e.g. `FEDEX`.
    pub carrier: String,
    /// Shipping method shown to the buyer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_method_name: Option<String>,
}

/// The address a shipment was fulfilled from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentAddress {
    /// First street line.
    pub street1: String,
    /// Second street line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    /// City.
    pub city: String,
    /// State or region code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    pub postal_code: String,
    /// ISO country code.
    pub country: String,
}

/// A line of a refund.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundItem {
    /// The merchant's item identifier.
    pub retailer_id: String,
    /// Units refunded.
    pub item_refund_quantity: u32,
}
