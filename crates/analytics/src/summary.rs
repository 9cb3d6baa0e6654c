use crate::Aggregator;
use core_types::{OrderRecord, OrderStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Global totals and categorical breakdowns over every order line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total_orders: usize,
    pub by_status: BTreeMap<OrderStatus, usize>,
    pub by_marketplace: BTreeMap<String, usize>,
    pub by_country: BTreeMap<String, usize>,
    pub by_fulfillment: BTreeMap<String, usize>,
    // Monetary totals include shipped lines only.
    pub total_revenue: Decimal,
    pub total_tax: Decimal,
    pub total_shipping: Decimal,
    // Counted across all statuses.
    pub total_items_sold: i64,
}

impl SummaryReport {
    pub fn status_count(&self, status: &OrderStatus) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }

    /// The `n` countries with the most orders, ties broken by country name.
    pub fn top_countries(&self, n: usize) -> Vec<(&str, usize)> {
        let mut countries: Vec<(&str, usize)> = self
            .by_country
            .iter()
            .map(|(country, count)| (country.as_str(), *count))
            .collect();
        countries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        countries.truncate(n);
        countries
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryAggregator;

impl Aggregator for SummaryAggregator {
    type Output = SummaryReport;

    fn name(&self) -> &'static str {
        "summary"
    }

    fn aggregate(&self, records: &[OrderRecord]) -> SummaryReport {
        let mut report = SummaryReport {
            total_orders: records.len(),
            ..SummaryReport::default()
        };

        for record in records {
            *report.by_status.entry(record.status.clone()).or_default() += 1;
            *report
                .by_marketplace
                .entry(record.marketplace.clone())
                .or_default() += 1;
            *report.by_country.entry(record.country.clone()).or_default() += 1;
            *report
                .by_fulfillment
                .entry(record.fulfillment_channel.clone())
                .or_default() += 1;

            if record.status.is_shipped() {
                report.total_revenue = report.total_revenue.saturating_add(record.item_price);
                report.total_tax = report.total_tax.saturating_add(record.item_tax);
                report.total_shipping = report.total_shipping.saturating_add(record.shipping_price);
            }
            report.total_items_sold = report.total_items_sold.saturating_add(record.quantity);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::testkit::RecordBuilder;
    use core_types::{ParseAudit, RawOrderRow};
    use rust_decimal_macros::dec;

    #[test]
    fn revenue_counts_shipped_lines_only() {
        let mut audit = ParseAudit::new();
        let unparsable = RawOrderRow {
            order_id: Some("3".to_string()),
            status: Some("Shipped".to_string()),
            item_price: Some("twelve euro".to_string()),
            ..RawOrderRow::default()
        };
        let records = vec![
            RecordBuilder::new("1").shipped().price(dec!(10.00)).build(),
            RecordBuilder::new("2").shipped().price(dec!(20.00)).build(),
            OrderRecord::from_raw(unparsable, &mut audit).unwrap(),
            RecordBuilder::new("4").cancelled().price(dec!(5.00)).build(),
        ];

        let report = SummaryAggregator.aggregate(&records);

        assert_eq!(records[2].item_price, Decimal::ZERO);
        assert_eq!(audit.item_price.invalid, 1);

        assert_eq!(report.total_orders, 4);
        assert_eq!(report.total_revenue, dec!(30.00));
        assert_eq!(report.status_count(&OrderStatus::Shipped), 3);
        assert_eq!(report.status_count(&OrderStatus::Cancelled), 1);
        assert_eq!(report.by_status.len(), 2);
    }

    #[test]
    fn tax_shipping_and_items() {
        let records = vec![
            RecordBuilder::new("1")
                .shipped()
                .price(dec!(10))
                .tax(dec!(2.20))
                .shipping(dec!(4.90))
                .quantity(2)
                .build(),
            RecordBuilder::new("2")
                .cancelled()
                .tax(dec!(1))
                .shipping(dec!(1))
                .quantity(3)
                .build(),
        ];

        let report = SummaryAggregator.aggregate(&records);

        assert_eq!(report.total_tax, dec!(2.20));
        assert_eq!(report.total_shipping, dec!(4.90));
        assert_eq!(report.total_items_sold, 5);
    }

    #[test]
    fn categorical_breakdowns() {
        let records = vec![
            RecordBuilder::new("1").country("IT").marketplace("Amazon.it").fba().build(),
            RecordBuilder::new("2").country("IT").marketplace("Amazon.it").build(),
            RecordBuilder::new("3").country("DE").marketplace("Amazon.de").build(),
        ];

        let report = SummaryAggregator.aggregate(&records);

        assert_eq!(report.by_country["IT"], 2);
        assert_eq!(report.by_marketplace["Amazon.de"], 1);
        assert_eq!(report.by_fulfillment["Amazon"], 1);
        assert_eq!(report.by_fulfillment["Merchant"], 2);
    }

    #[test]
    fn top_countries_breaks_ties_by_name() {
        let records = vec![
            RecordBuilder::new("1").country("FR").build(),
            RecordBuilder::new("2").country("DE").build(),
            RecordBuilder::new("3").country("IT").build(),
            RecordBuilder::new("4").country("IT").build(),
        ];

        let report = SummaryAggregator.aggregate(&records);

        assert_eq!(report.top_countries(2), vec![("IT", 2), ("DE", 1)]);
        assert_eq!(report.top_countries(10).len(), 3);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let records = vec![
            RecordBuilder::new("1")
                .shipped()
                .price(Decimal::MAX)
                .tax(Decimal::MAX)
                .quantity(i64::MAX)
                .build(),
            RecordBuilder::new("2")
                .shipped()
                .price(Decimal::MAX)
                .tax(Decimal::MAX)
                .quantity(i64::MAX)
                .build(),
        ];

        let report = SummaryAggregator.aggregate(&records);

        assert_eq!(report.total_revenue, Decimal::MAX);
        assert_eq!(report.total_tax, Decimal::MAX);
        assert_eq!(report.total_items_sold, i64::MAX);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let report = SummaryAggregator.aggregate(&[]);
        assert_eq!(report, SummaryReport::default());
        assert_eq!(report.total_revenue, Decimal::ZERO);
        assert!(report.top_countries(5).is_empty());
    }
}
