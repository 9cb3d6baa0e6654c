use crate::Aggregator;
use core_types::{MonthKey, OrderRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Shipped revenue per ship-country per month.
///
/// Ranking markets is left to readers; see `top_markets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MarketMonthlyReport {
    pub markets: BTreeMap<String, BTreeMap<MonthKey, Decimal>>,
}

impl MarketMonthlyReport {
    /// Total revenue per country across all months.
    pub fn market_totals(&self) -> BTreeMap<&str, Decimal> {
        self.markets
            .iter()
            .map(|(country, months)| (
                    country.as_str(),
                    months
                        .values()
                        .fold(Decimal::ZERO, |total, revenue| total.saturating_add(*revenue)),
                ))
            .collect()
    }

    /// The `n` countries with the most revenue, ties broken by country name.
    pub fn top_markets(&self, n: usize) -> Vec<(&str, Decimal)> {
        let mut totals: Vec<(&str, Decimal)> = self.market_totals().into_iter().collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        totals.truncate(n);
        totals
    }

    /// Sorted union of the months in which any of `countries` had revenue.
    pub fn month_axis<'a, I>(&self, countries: I) -> Vec<MonthKey>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let months: BTreeSet<MonthKey> = countries
            .into_iter()
            .filter_map(|country| self.markets.get(country))
            .flat_map(|months| months.keys().copied())
            .collect();
        months.into_iter().collect()
    }

    /// Revenue for a country in a month, zero where there was none.
    pub fn revenue(&self, country: &str, month: &MonthKey) -> Decimal {
        self.markets
            .get(country)
            .and_then(|months| months.get(month))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MarketMonthlyAggregator;

impl Aggregator for MarketMonthlyAggregator {
    type Output = MarketMonthlyReport;

    fn name(&self) -> &'static str {
        "market_monthly"
    }

    fn aggregate(&self, records: &[OrderRecord]) -> MarketMonthlyReport {
        let mut report = MarketMonthlyReport::default();

        for record in records.iter().filter(|r| r.status.is_shipped()) {
            let Some(month) = record.month_key() else {
                continue;
            };
            let cell = report
                .markets
                .entry(record.country.clone())
                .or_default()
                .entry(month)
                .or_default();
            *cell = cell.saturating_add(record.item_price);
        }

        report
    }
}
