use crate::Aggregator;
use crate::segments::{self, MonthlySegmentStats, SegmentStats};
use core_types::{FulfillmentClass, MonthKey, OrderRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Fulfilled-by-Amazon versus fulfilled-by-merchant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FulfillmentReport {
    pub fba: SegmentStats,
    pub fbm: SegmentStats,
    pub monthly_fba: BTreeMap<MonthKey, MonthlySegmentStats>,
    pub monthly_fbm: BTreeMap<MonthKey, MonthlySegmentStats>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FulfillmentAggregator;

impl Aggregator for FulfillmentAggregator {
    type Output = FulfillmentReport;

    fn name(&self) -> &'static str {
        "fulfillment"
    }

    fn aggregate(&self, records: &[OrderRecord]) -> FulfillmentReport {
        let (fba, fbm) = segments::split(records, |r| r.fulfillment == FulfillmentClass::Fba);

        FulfillmentReport {
            fba: fba.totals,
            fbm: fbm.totals,
            monthly_fba: fba.monthly,
            monthly_fbm: fbm.monthly,
        }
    }
}
