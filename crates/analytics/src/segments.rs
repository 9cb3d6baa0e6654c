//! Two-way comparisons that split every record into exactly one of two segments.
//!
//! FBA vs FBM and business vs consumer share this machinery; they differ only
//! in the predicate that picks a record's segment.

use core_types::{MonthKey, OrderRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals for one side of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentStats {
    pub orders: usize,
    /// Shipped lines only.
    pub revenue: Decimal,
    pub items: i64,
    pub cancelled: usize,
}

impl SegmentStats {
    /// Cancelled share of this segment's orders, as a percentage.
    pub fn cancellation_rate_pct(&self) -> Option<Decimal> {
        if self.orders == 0 {
            return None;
        }
        Some(Decimal::from(self.cancelled) / Decimal::from(self.orders) * Decimal::ONE_HUNDRED)
    }
}

/// One month of shipped activity for a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlySegmentStats {
    pub orders: usize,
    pub revenue: Decimal,
}

/// A segment's totals together with its shipped-only monthly series.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SegmentSeries {
    pub totals: SegmentStats,
    pub monthly: BTreeMap<MonthKey, MonthlySegmentStats>,
}

impl SegmentSeries {
    fn add(&mut self, record: &OrderRecord) {
        self.totals.orders += 1;
        self.totals.items = self.totals.items.saturating_add(record.quantity);
        if record.status.is_cancelled() {
            self.totals.cancelled += 1;
        }

        if !record.status.is_shipped() {
            return;
        }
        self.totals.revenue = self.totals.revenue.saturating_add(record.item_price);

        // The monthly series only ever sees shipped, dated lines.
        if let Some(month) = record.month_key() {
            let bucket = self.monthly.entry(month).or_default();
            bucket.orders += 1;
            bucket.revenue = bucket.revenue.saturating_add(record.item_price);
        }
    }
}

/// Splits `records` into `(primary, secondary)` by `is_primary`.
///
/// Classification is total, so the two order counts always sum to `records.len()`
/// and the two revenues sum to the global shipped revenue.
pub(crate) fn split<F>(records: &[OrderRecord], is_primary: F) -> (SegmentSeries, SegmentSeries)
where
    F: Fn(&OrderRecord) -> bool,
{
    let mut primary = SegmentSeries::default();
    let mut secondary = SegmentSeries::default();

    for record in records {
        if is_primary(record) {
            primary.add(record);
        } else {
            secondary.add(record);
        }
    }

    (primary, secondary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::testkit::RecordBuilder;
    use rust_decimal_macros::dec;

    #[test]
    fn cancelled_lines_count_but_earn_nothing() {
        let records = vec![
            RecordBuilder::new("1")
                .cancelled()
                .price(dec!(12))
                .quantity(2)
                .purchased("2024-05-01T00:00:00Z")
                .build(),
        ];

        let (primary, secondary) = split(&records, |_| true);

        assert_eq!(primary.totals.orders, 1);
        assert_eq!(primary.totals.cancelled, 1);
        assert_eq!(primary.totals.items, 2);
        assert_eq!(primary.totals.revenue, Decimal::ZERO);
        assert!(primary.monthly.is_empty());
        assert_eq!(secondary, SegmentSeries::default());
    }

    #[test]
    fn cancellation_rate() {
        let stats = SegmentStats {
            orders: 4,
            cancelled: 1,
            ..SegmentStats::default()
        };
        assert_eq!(stats.cancellation_rate_pct(), Some(dec!(25)));
        assert_eq!(SegmentStats::default().cancellation_rate_pct(), None);
    }
}
