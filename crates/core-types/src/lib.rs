//! # Orderlens Core Types
//!
//! The record model shared by every other crate: one normalised order line,
//! the closed classifications derived from it, and the lenient field parsers
//! that build it.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** No knowledge of files, configuration or reporting.
//! - **Classify once:** Status, fulfillment class and customer class are decided
//!   when a record is normalised, never re-derived from strings downstream.
//! - **Auditable leniency:** Bad numeric or date fields fall back to defaults,
//!   and every fallback is counted in a `ParseAudit`.

pub mod audit;
pub mod enums;
pub mod error;
pub mod month;
pub mod parse;
pub mod structs;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

// Re-export the core types to provide a clean public API.
pub use audit::{FieldAudit, ParseAudit};
pub use enums::{CustomerClass, FulfillmentClass, OrderStatus};
pub use error::{CoreError, ParseIssue};
pub use month::MonthKey;
pub use structs::{OrderRecord, RawOrderRow, UNKNOWN};
