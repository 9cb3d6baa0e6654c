use crate::audit::ParseAudit;
use crate::enums::{CustomerClass, FulfillmentClass, OrderStatus};
use crate::month::MonthKey;
use crate::parse::{non_blank, try_parse_number, try_parse_quantity, try_parse_timestamp};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::Serialize;

/// Placeholder for absent categorical fields and the SKU sentinel.
pub const UNKNOWN: &str = "Unknown";

/// One row of an order export exactly as it was read.
///
/// Every field is optional: a missing column and a blank cell are both `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOrderRow {
    pub order_id: Option<String>,
    pub status: Option<String>,
    pub sales_channel: Option<String>,
    pub ship_country: Option<String>,
    pub fulfillment_channel: Option<String>,
    pub is_business_order: Option<String>,
    pub purchase_date: Option<String>,
    pub sku: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    pub item_price: Option<String>,
    pub item_tax: Option<String>,
    pub shipping_price: Option<String>,
    pub promotion_ids: Option<String>,
}

impl RawOrderRow {
    /// Header of the order id column; rows without it are dropped.
    pub const ORDER_ID_COLUMN: &'static str = "amazon-order-id";

    /// Builds a row by asking `cell` for each export column by its header name.
    ///
    /// `cell` should return `None` for absent columns; blank text is mapped to `None` here.
    pub fn from_columns<F>(mut cell: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut get = |column: &str| cell(column).filter(|value| !value.is_empty());
        Self {
            order_id: get(Self::ORDER_ID_COLUMN),
            status: get("order-status"),
            sales_channel: get("sales-channel"),
            ship_country: get("ship-country"),
            fulfillment_channel: get("fulfillment-channel"),
            is_business_order: get("is-business-order"),
            purchase_date: get("purchase-date"),
            sku: get("sku"),
            product_name: get("product-name"),
            quantity: get("quantity"),
            item_price: get("item-price"),
            item_tax: get("item-tax"),
            shipping_price: get("shipping-price"),
            promotion_ids: get("promotion-ids"),
        }
    }
}

/// The normalised, immutable form of one order line.
///
/// Built once by `OrderRecord::from_raw` and only ever read afterwards. All
/// classification (status, FBA/FBM, business/consumer) happens here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub status: OrderStatus,
    pub marketplace: String,
    pub country: String,
    /// The raw channel label, as counted by the summary breakdown.
    pub fulfillment_channel: String,
    pub fulfillment: FulfillmentClass,
    pub is_business: bool,
    pub purchase_timestamp: Option<DateTime<FixedOffset>>,
    pub sku: String,
    /// May be empty; product rollups keep the first non-empty name per SKU.
    pub product_name: String,
    pub quantity: i64,
    pub item_price: Decimal,
    pub item_tax: Decimal,
    pub shipping_price: Decimal,
    /// Trimmed; empty means the order carried no promotion.
    pub promotion_ids: String,
}

impl OrderRecord {
    /// Normalises a raw row, recording every defaulted numeric or date field in `audit`.
    ///
    /// Returns `None` when the row has no order id; such rows never reach the analytics.
    pub fn from_raw(raw: RawOrderRow, audit: &mut ParseAudit) -> Option<Self> {
        let order_id = non_blank(raw.order_id.as_deref()).ok()?.to_string();

        // Labels are classified verbatim; only a blank cell falls back to "Unknown".
        let status = match raw.status.as_deref() {
            Some(label) if !label.trim().is_empty() => OrderStatus::from_raw(label),
            _ => OrderStatus::from_raw(""),
        };
        let fulfillment_channel = text_or_unknown(raw.fulfillment_channel.as_deref());
        let fulfillment = FulfillmentClass::from_channel(&fulfillment_channel);
        let is_business = raw
            .is_business_order
            .as_deref()
            .map(|flag| flag.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let purchase_timestamp = audit.purchase_date.settle(
            try_parse_timestamp(raw.purchase_date.as_deref()).map(Some),
            None,
        );
        let quantity = audit
            .quantity
            .settle(try_parse_quantity(raw.quantity.as_deref()), 0);
        let item_price = audit
            .item_price
            .settle(try_parse_number(raw.item_price.as_deref()), Decimal::ZERO);
        let item_tax = audit
            .item_tax
            .settle(try_parse_number(raw.item_tax.as_deref()), Decimal::ZERO);
        let shipping_price = audit
            .shipping_price
            .settle(try_parse_number(raw.shipping_price.as_deref()), Decimal::ZERO);

        Some(Self {
            order_id,
            status,
            marketplace: text_or_unknown(raw.sales_channel.as_deref()),
            country: text_or_unknown(raw.ship_country.as_deref()),
            fulfillment_channel,
            fulfillment,
            is_business,
            purchase_timestamp,
            sku: text_or_unknown(raw.sku.as_deref()),
            product_name: trimmed(raw.product_name.as_deref()),
            quantity,
            item_price,
            item_tax,
            shipping_price,
            promotion_ids: trimmed(raw.promotion_ids.as_deref()),
        })
    }

    pub fn customer(&self) -> CustomerClass {
        CustomerClass::from_flag(self.is_business)
    }

    /// The purchase month, if the record has a usable timestamp.
    pub fn month_key(&self) -> Option<MonthKey> {
        self.purchase_timestamp.as_ref().and_then(MonthKey::from_timestamp)
    }

    /// Revenue this line contributes: its item price when shipped, zero otherwise.
    pub fn shipped_revenue(&self) -> Decimal {
        if self.status.is_shipped() {
            self.item_price
        } else {
            Decimal::ZERO
        }
    }

    /// True when the SKU is a real product identifier rather than the sentinel.
    pub fn has_known_sku(&self) -> bool {
        self.sku != UNKNOWN
    }

    pub fn has_promotion(&self) -> bool {
        !self.promotion_ids.is_empty()
    }
}

fn text_or_unknown(raw: Option<&str>) -> String {
    non_blank(raw).unwrap_or(UNKNOWN).to_string()
}

fn trimmed(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or("").to_string()
}
