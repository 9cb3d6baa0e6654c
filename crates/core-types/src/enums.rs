use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Status label used when the export leaves `order-status` blank.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// The state an order line was in when the export was taken.
///
/// Classified once when a record is normalised, so every aggregator matches on
/// the same closed set instead of comparing strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderStatus {
    Shipped,
    Cancelled,
    Pending,
    Unshipped,
    /// Any status the export uses that is not one of the above, kept verbatim.
    Other(String),
}

impl OrderStatus {
    /// Classifies a raw `order-status` value. Matching is exact, like the exports themselves.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Shipped" => OrderStatus::Shipped,
            "Cancelled" => OrderStatus::Cancelled,
            "Pending" => OrderStatus::Pending,
            "Unshipped" => OrderStatus::Unshipped,
            "" => OrderStatus::Other(UNKNOWN_STATUS.to_string()),
            other => OrderStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Pending => "Pending",
            OrderStatus::Unshipped => "Unshipped",
            OrderStatus::Other(raw) => raw,
        }
    }

    /// Only shipped lines carry revenue, tax and shipping into any total.
    pub fn is_shipped(&self) -> bool {
        matches!(self, OrderStatus::Shipped)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Serialized as the raw label so statuses can be used as JSON object keys.
impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(OrderStatus::from_raw(&raw))
    }
}

/// Which party physically ships the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FulfillmentClass {
    /// Fulfilled by Amazon.
    Fba,
    /// Fulfilled by the merchant.
    Fbm,
}

impl FulfillmentClass {
    /// `"Amazon"` means FBA; every other channel, including a blank one, is FBM.
    pub fn from_channel(channel: &str) -> Self {
        if channel == "Amazon" {
            FulfillmentClass::Fba
        } else {
            FulfillmentClass::Fbm
        }
    }
}

/// Whether the buyer ordered through a business account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerClass {
    Business,
    Consumer,
}

impl CustomerClass {
    pub fn from_flag(is_business: bool) -> Self {
        if is_business {
            CustomerClass::Business
        } else {
            CustomerClass::Consumer
        }
    }
}
