use crate::Aggregator;
use core_types::{MonthKey, OrderRecord, OrderStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Activity within a single calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub orders: usize,
    pub revenue: Decimal,
    pub items: i64,
    pub shipped: usize,
    pub cancelled: usize,
    pub pending: usize,
}

/// Month-by-month series, ascending by month.
pub type MonthlyTrend = BTreeMap<MonthKey, MonthlyStats>;

/// Buckets records by purchase month.
///
/// Records without a usable timestamp are left out of this view only.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonthlyTrendAggregator;

impl Aggregator for MonthlyTrendAggregator {
    type Output = MonthlyTrend;

    fn name(&self) -> &'static str {
        "monthly_trends"
    }

    fn aggregate(&self, records: &[OrderRecord]) -> MonthlyTrend {
        let mut trend = MonthlyTrend::new();

        for record in records {
            let Some(month) = record.month_key() else {
                continue;
            };
            let stats = trend.entry(month).or_default();

            stats.orders += 1;
            stats.items = stats.items.saturating_add(record.quantity);
            match record.status {
                OrderStatus::Shipped => {
                    stats.shipped += 1;
                    stats.revenue = stats.revenue.saturating_add(record.item_price);
                }
                OrderStatus::Cancelled => stats.cancelled += 1,
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Unshipped | OrderStatus::Other(_) => {}
            }
        }

        trend
    }
}

/// The month with the highest revenue; the earliest such month wins a tie.
pub fn best_month(trend: &MonthlyTrend) -> Option<(MonthKey, &MonthlyStats)> {
    trend.iter().fold(None, |best, (month, stats)| match best {
        Some((_, top)) if top.revenue >= stats.revenue => best,
        _ => Some((*month, stats)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::testkit::RecordBuilder;
    use rust_decimal_macros::dec;

    #[test]
    fn single_shipped_order_lands_in_its_month() {
        let records = vec![
            RecordBuilder::new("1")
                .shipped()
                .purchased("2024-03-05T10:00:00Z")
                .price(dec!(40))
                .build(),
        ];

        let trend = MonthlyTrendAggregator.aggregate(&records);
        let march = &trend[&"2024-03".parse().unwrap()];

        assert_eq!(march.orders, 1);
        assert_eq!(march.revenue, dec!(40));
        assert_eq!(march.shipped, 1);
        assert_eq!(march.cancelled, 0);
    }

    #[test]
    fn status_counters_and_items() {
        let records = vec![
            RecordBuilder::new("1")
                .shipped()
                .purchased("2024-01-02T00:00:00Z")
                .quantity(1)
                .price(dec!(5))
                .build(),
            RecordBuilder::new("2")
                .cancelled()
                .purchased("2024-01-09T00:00:00Z")
                .quantity(2)
                .price(dec!(7))
                .build(),
            RecordBuilder::new("3").pending().purchased("2024-01-10T00:00:00Z").quantity(3).build(),
            RecordBuilder::new("4")
                .status(OrderStatus::Unshipped)
                .purchased("2024-01-11T00:00:00Z")
                .build(),
        ];

        let trend = MonthlyTrendAggregator.aggregate(&records);
        let january = &trend[&"2024-01".parse().unwrap()];

        assert_eq!(january.orders, 4);
        assert_eq!(january.shipped, 1);
        assert_eq!(january.cancelled, 1);
        assert_eq!(january.pending, 1);
        assert_eq!(january.items, 6);
        assert_eq!(january.revenue, dec!(5));
    }

    #[test]
    fn records_without_timestamp_are_skipped() {
        let records = vec![
            RecordBuilder::new("1").shipped().price(dec!(10)).build(),
            RecordBuilder::new("2").shipped().purchased("not a date").price(dec!(10)).build(),
        ];

        assert!(MonthlyTrendAggregator.aggregate(&records).is_empty());
    }

    #[test]
    fn keys_are_ascending() {
        let records = vec![
            RecordBuilder::new("1").purchased("2024-11-01T00:00:00Z").build(),
            RecordBuilder::new("2").purchased("2023-12-31T00:00:00Z").build(),
            RecordBuilder::new("3").purchased("2024-02-15T00:00:00Z").build(),
        ];

        let keys: Vec<String> = MonthlyTrendAggregator
            .aggregate(&records)
            .keys()
            .map(ToString::to_string)
            .collect();
        assert_eq!(keys, vec!["2023-12", "2024-02", "2024-11"]);
    }

    #[test]
    fn best_month_prefers_earliest_on_tie() {
        let records = vec![
            RecordBuilder::new("1")
                .shipped()
                .purchased("2024-02-01T00:00:00Z")
                .price(dec!(30))
                .build(),
            RecordBuilder::new("2")
                .shipped()
                .purchased("2024-01-01T00:00:00Z")
                .price(dec!(30))
                .build(),
            RecordBuilder::new("3")
                .shipped()
                .purchased("2024-03-01T00:00:00Z")
                .price(dec!(10))
                .build(),
        ];

        let trend = MonthlyTrendAggregator.aggregate(&records);
        let (month, stats) = best_month(&trend).unwrap();

        assert_eq!(month.to_string(), "2024-01");
        assert_eq!(stats.revenue, dec!(30));
        assert!(best_month(&MonthlyTrend::new()).is_none());
    }
}
