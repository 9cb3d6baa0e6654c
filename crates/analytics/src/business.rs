use crate::Aggregator;
use crate::segments::{self, MonthlySegmentStats, SegmentStats};
use core_types::{CustomerClass, MonthKey, OrderRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Business-account orders versus consumer orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BusinessReport {
    pub business: SegmentStats,
    pub consumer: SegmentStats,
    pub monthly_business: BTreeMap<MonthKey, MonthlySegmentStats>,
    pub monthly_consumer: BTreeMap<MonthKey, MonthlySegmentStats>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BusinessAggregator;

impl Aggregator for BusinessAggregator {
    type Output = BusinessReport;

    fn name(&self) -> &'static str {
        "business"
    }

    fn aggregate(&self, records: &[OrderRecord]) -> BusinessReport {
        let (business, consumer) =
            segments::split(records, |r| r.customer() == CustomerClass::Business);

        BusinessReport {
            business: business.totals,
            consumer: consumer.totals,
            monthly_business: business.monthly,
            monthly_consumer: consumer.monthly,
        }
    }
}
