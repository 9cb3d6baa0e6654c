//! # Orderlens Analytics Engine
//!
//! This crate turns a flat batch of order lines into the aggregate views the
//! reports are built from.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   configuration or rendering. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Each aggregator is a single reduction over an
//!   immutable slice of records. None depends on another's output, and running one
//!   twice over the same input gives identical results.
//! - **Shipped-only money:** Revenue, tax and shipping accumulate for shipped lines
//!   only; quantities and order counts include every status.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: Runs every aggregator and bundles the results.
//! - `AnalyticsReport`: The bundle consumed by renderers and exporters.
//! - `Aggregator`: The trait each individual view implements.
//! - `AnalyticsError`: Raised by consumers that refuse an empty batch.

// Declare the modules that constitute this crate.
pub mod business;
pub mod engine;
pub mod error;
pub mod fulfillment;
pub mod insights;
pub mod markets;
pub mod monthly;
pub mod products;
pub mod promotions;
pub mod report;
pub mod segments;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use business::{BusinessAggregator, BusinessReport};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use fulfillment::{FulfillmentAggregator, FulfillmentReport};
pub use insights::{Highlight, Insights};
pub use markets::{MarketMonthlyAggregator, MarketMonthlyReport};
pub use monthly::{MonthlyStats, MonthlyTrend, MonthlyTrendAggregator};
pub use products::{ProductAggregator, ProductSummary};
pub use promotions::{PromotionAggregator, PromotionReport, PromotionStats};
pub use report::AnalyticsReport;
pub use segments::{MonthlySegmentStats, SegmentStats};
pub use summary::{SummaryAggregator, SummaryReport};

use core_types::OrderRecord;

/// A single analytical view over a batch of order records.
///
/// Implementations keep their accumulator private to `aggregate` and hand back
/// only the finished result, so no caller ever observes a partial view.
pub trait Aggregator {
    type Output;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn aggregate(&self, records: &[OrderRecord]) -> Self::Output;
}
