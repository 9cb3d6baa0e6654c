use crate::markets::MarketMonthlyReport;
use crate::monthly::{self, MonthlyTrend};
use crate::products::ProductSummary;
use crate::summary::SummaryReport;
use core_types::{MonthKey, OrderStatus};
use rust_decimal::Decimal;
use serde::Serialize;

/// A name paired with the revenue that earned it a headline slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight<K> {
    pub key: K,
    pub revenue: Decimal,
}

/// Headline figures read off the finished aggregates.
///
/// Nothing here is a new aggregation rule: each field is a ranking or ratio
/// over results the aggregators already produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    /// Shipped orders as a percentage of all orders.
    pub success_rate_pct: Option<Decimal>,
    pub best_month: Option<Highlight<MonthKey>>,
    /// Country with the highest shipped revenue.
    pub top_market: Option<Highlight<String>>,
    /// SKU at the head of the product ranking.
    pub top_product: Option<Highlight<String>>,
    /// Shipped revenue per shipped order.
    pub average_order_value: Option<Decimal>,
}

impl Insights {
    pub fn derive(
        summary: &SummaryReport,
        trend: &MonthlyTrend,
        markets: &MarketMonthlyReport,
        products: &[ProductSummary],
    ) -> Self {
        let shipped = summary.status_count(&OrderStatus::Shipped);

        let success_rate_pct = (summary.total_orders > 0).then(|| {
            Decimal::from(shipped) / Decimal::from(summary.total_orders) * Decimal::ONE_HUNDRED
        });
        let average_order_value =
            (shipped > 0).then(|| summary.total_revenue / Decimal::from(shipped));

        let best_month = monthly::best_month(trend).map(|(month, stats)| Highlight {
            key: month,
            revenue: stats.revenue,
        });
        let top_market = markets
            .top_markets(1)
            .into_iter()
            .next()
            .map(|(country, revenue)| Highlight {
                key: country.to_string(),
                revenue,
            });
        let top_product = products.first().map(|product| Highlight {
            key: product.sku.clone(),
            revenue: product.total_revenue,
        });

        Self {
            success_rate_pct,
            best_month,
            top_market,
            top_product,
            average_order_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::AnalyticsEngine;
    use core_types::testkit::RecordBuilder;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn headline_figures() {
        let records = vec![
            RecordBuilder::new("1")
                .sku("A1")
                .country("IT")
                .shipped()
                .price(dec!(30))
                .purchased("2024-01-10T00:00:00Z")
                .build(),
            RecordBuilder::new("2")
                .sku("B2")
                .country("DE")
                .shipped()
                .price(dec!(50))
                .purchased("2024-02-10T00:00:00Z")
                .build(),
            RecordBuilder::new("3")
                .sku("A1")
                .country("IT")
                .shipped()
                .price(dec!(40))
                .purchased("2024-02-11T00:00:00Z")
                .build(),
            RecordBuilder::new("4").sku("B2").country("DE").cancelled().price(dec!(10)).build(),
        ];

        let insights = AnalyticsEngine::new().calculate(&records).insights;

        assert_eq!(insights.success_rate_pct, Some(dec!(75)));
        assert_eq!(insights.average_order_value, Some(dec!(40)));

        let best = insights.best_month.unwrap();
        assert_eq!(best.key.to_string(), "2024-02");
        assert_eq!(best.revenue, dec!(90));

        let market = insights.top_market.unwrap();
        assert_eq!((market.key.as_str(), market.revenue), ("IT", dec!(70)));

        let product = insights.top_product.unwrap();
        assert_eq!((product.key.as_str(), product.revenue), ("A1", dec!(70)));
    }

    #[test]
    fn ratios_are_absent_without_orders() {
        let insights = AnalyticsEngine::new().calculate(&[]).insights;
        assert_eq!(insights, super::Insights::default());

        let cancelled_only = vec![RecordBuilder::new("1").cancelled().build()];
        let insights = AnalyticsEngine::new().calculate(&cancelled_only).insights;
        assert_eq!(insights.success_rate_pct, Some(Decimal::ZERO));
        assert_eq!(insights.average_order_value, None);
    }
}
