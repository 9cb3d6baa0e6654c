use crate::business::BusinessReport;
use crate::error::AnalyticsError;
use crate::fulfillment::FulfillmentReport;
use crate::insights::Insights;
use crate::markets::MarketMonthlyReport;
use crate::monthly::MonthlyTrend;
use crate::products::ProductSummary;
use crate::promotions::PromotionReport;
use crate::summary::SummaryReport;
use serde::Serialize;

/// Every aggregate computed over one batch of order records.
///
/// This struct is the final output of the `AnalyticsEngine` and the only thing
/// the renderers and the JSON export read from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub summary: SummaryReport,
    pub products: Vec<ProductSummary>,
    pub monthly_trends: MonthlyTrend,
    pub fulfillment: FulfillmentReport,
    pub business: BusinessReport,
    pub promotions: PromotionReport,
    pub market_monthly: MarketMonthlyReport,
    pub insights: Insights,
}

impl AnalyticsReport {
    pub fn is_empty(&self) -> bool {
        self.summary.total_orders == 0
    }

    /// Guards presentation layers, which refuse to render an empty batch.
    pub fn ensure_not_empty(&self) -> Result<&Self, AnalyticsError> {
        if self.is_empty() {
            return Err(AnalyticsError::EmptyInput);
        }
        Ok(self)
    }
}
