use crate::Aggregator;
use core_types::{MonthKey, OrderRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Usage of a single promotion id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromotionStats {
    pub count: usize,
    pub unique_skus: usize,
    /// Distinct SKUs the promotion touched, sorted.
    pub skus: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromotionReport {
    pub total_with_promotions: usize,
    pub by_promotion_type: BTreeMap<String, PromotionStats>,
    pub skus_on_promotion: BTreeMap<String, usize>,
    pub monthly_promotions: BTreeMap<MonthKey, usize>,
}

impl PromotionReport {
    /// The `n` most used promotions, ties broken by promotion id.
    pub fn top_promotions(&self, n: usize) -> Vec<(&str, &PromotionStats)> {
        let mut promotions: Vec<(&str, &PromotionStats)> = self
            .by_promotion_type
            .iter()
            .map(|(id, stats)| (id.as_str(), stats))
            .collect();
        promotions.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0)));
        promotions.truncate(n);
        promotions
    }
}

/// Analyses orders that carried a promotion id.
///
/// The whole trimmed `promotion-ids` value is the grouping key. The unknown-SKU
/// sentinel still counts the order but never enters a SKU set or the per-SKU map.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromotionAggregator;

impl Aggregator for PromotionAggregator {
    type Output = PromotionReport;

    fn name(&self) -> &'static str {
        "promotions"
    }

    fn aggregate(&self, records: &[OrderRecord]) -> PromotionReport {
        let mut report = PromotionReport::default();
        let mut promotions: BTreeMap<&str, (usize, BTreeSet<&str>)> = BTreeMap::new();

        for record in records.iter().filter(|r| r.has_promotion()) {
            report.total_with_promotions += 1;

            let (count, skus) = promotions.entry(record.promotion_ids.as_str()).or_default();
            *count += 1;
            if record.has_known_sku() {
                skus.insert(record.sku.as_str());
                *report
                    .skus_on_promotion
                    .entry(record.sku.clone())
                    .or_default() += 1;
            }

            if let Some(month) = record.month_key() {
                *report.monthly_promotions.entry(month).or_default() += 1;
            }
        }

        report.by_promotion_type = promotions
            .into_iter()
            .map(|(id, (count, skus))| {
                let skus: Vec<String> = skus.into_iter().map(str::to_string).collect();
                let stats = PromotionStats {
                    count,
                    unique_skus: skus.len(),
                    skus,
                };
                (id.to_string(), stats)
            })
            .collect();

        report
    }
}
