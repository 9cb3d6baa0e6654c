//! Builders for order records used across tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests in other crates).

use crate::enums::{FulfillmentClass, OrderStatus};
use crate::parse::parse_timestamp;
use crate::structs::{OrderRecord, UNKNOWN};
use rust_decimal::Decimal;

/// Fluent construction of an `OrderRecord` with export-like defaults:
/// status `Pending`, merchant-fulfilled, consumer, no timestamp, unknown SKU.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: OrderRecord,
}

impl RecordBuilder {
    pub fn new(order_id: &str) -> Self {
        Self {
            record: OrderRecord {
                order_id: order_id.to_string(),
                status: OrderStatus::Pending,
                marketplace: "Amazon.it".to_string(),
                country: "IT".to_string(),
                fulfillment_channel: "Merchant".to_string(),
                fulfillment: FulfillmentClass::Fbm,
                is_business: false,
                purchase_timestamp: None,
                sku: UNKNOWN.to_string(),
                product_name: String::new(),
                quantity: 0,
                item_price: Decimal::ZERO,
                item_tax: Decimal::ZERO,
                shipping_price: Decimal::ZERO,
                promotion_ids: String::new(),
            },
        }
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.record.status = status;
        self
    }

    pub fn shipped(self) -> Self {
        self.status(OrderStatus::Shipped)
    }

    pub fn cancelled(self) -> Self {
        self.status(OrderStatus::Cancelled)
    }

    pub fn pending(self) -> Self {
        self.status(OrderStatus::Pending)
    }

    pub fn marketplace(mut self, marketplace: &str) -> Self {
        self.record.marketplace = marketplace.to_string();
        self
    }

    pub fn country(mut self, country: &str) -> Self {
        self.record.country = country.to_string();
        self
    }

    pub fn fba(mut self) -> Self {
        self.record.fulfillment_channel = "Amazon".to_string();
        self.record.fulfillment = FulfillmentClass::Fba;
        self
    }

    pub fn business(mut self) -> Self {
        self.record.is_business = true;
        self
    }

    /// Sets the purchase timestamp from ISO-8601 text. Unparsable text leaves it unset.
    pub fn purchased(mut self, timestamp: &str) -> Self {
        self.record.purchase_timestamp = parse_timestamp(Some(timestamp));
        self
    }

    pub fn sku(mut self, sku: &str) -> Self {
        self.record.sku = sku.to_string();
        self
    }

    pub fn product_name(mut self, name: &str) -> Self {
        self.record.product_name = name.to_string();
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.record.quantity = quantity;
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.record.item_price = price;
        self
    }

    pub fn tax(mut self, tax: Decimal) -> Self {
        self.record.item_tax = tax;
        self
    }

    pub fn shipping(mut self, shipping: Decimal) -> Self {
        self.record.shipping_price = shipping;
        self
    }

    pub fn promotion(mut self, promotion_ids: &str) -> Self {
        self.record.promotion_ids = promotion_ids.trim().to_string();
        self
    }

    pub fn build(self) -> OrderRecord {
        self.record
    }
}
