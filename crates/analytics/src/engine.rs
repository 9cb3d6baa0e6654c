use crate::business::BusinessAggregator;
use crate::fulfillment::FulfillmentAggregator;
use crate::insights::Insights;
use crate::markets::MarketMonthlyAggregator;
use crate::monthly::MonthlyTrendAggregator;
use crate::products::ProductAggregator;
use crate::promotions::PromotionAggregator;
use crate::report::AnalyticsReport;
use crate::summary::SummaryAggregator;
use crate::Aggregator;
use core_types::OrderRecord;

/// A stateless calculator that runs every aggregator over one batch of records.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for building every aggregate.
    ///
    /// # Arguments
    ///
    /// * `records` - The complete, already-normalised batch. It is only read.
    ///
    /// # Returns
    ///
    /// An `AnalyticsReport`. An empty batch yields an all-zero report rather than an error;
    /// whether that is worth presenting is for the caller to decide.
    pub fn calculate(&self, records: &[OrderRecord]) -> AnalyticsReport {
        tracing::info!(records = records.len(), "Aggregating order records.");

        let summary = self.run(&SummaryAggregator, records);
        let products = self.run(&ProductAggregator, records);
        let monthly_trends = self.run(&MonthlyTrendAggregator, records);
        let fulfillment = self.run(&FulfillmentAggregator, records);
        let business = self.run(&BusinessAggregator, records);
        let promotions = self.run(&PromotionAggregator, records);
        let market_monthly = self.run(&MarketMonthlyAggregator, records);

        let insights = Insights::derive(&summary, &monthly_trends, &market_monthly, &products);

        AnalyticsReport {
            summary,
            products,
            monthly_trends,
            fulfillment,
            business,
            promotions,
            market_monthly,
            insights,
        }
    }

    fn run<A: Aggregator>(&self, aggregator: &A, records: &[OrderRecord]) -> A::Output {
        let output = aggregator.aggregate(records);
        tracing::debug!(aggregator = aggregator.name(), "Aggregation pass complete.");
        output
    }
}
