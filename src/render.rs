//! Terminal rendering of an `AnalyticsReport`.

use analytics::{
    AnalyticsReport, Insights, MarketMonthlyReport, MonthlySegmentStats, MonthlyTrend,
    ProductSummary, PromotionReport, SegmentStats, SummaryReport,
};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Row, Table};
use configuration::ReportSettings;
use core_types::MonthKey;
use ingest::LoadedOrders;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

const PRODUCT_NAME_WIDTH: usize = 40;

/// Renders every report section, in reading order, as one string.
pub fn render_report(
    report: &AnalyticsReport,
    loaded: &LoadedOrders,
    limits: &ReportSettings,
) -> String {
    let summary = &report.summary;
    let total = summary.total_orders;
    let fulfillment = &report.fulfillment;
    let business = &report.business;

    let by_status = summary.by_status.iter().map(|(s, c)| (s.as_str(), *c));
    let by_marketplace = summary.by_marketplace.iter().map(|(m, c)| (m.as_str(), *c));
    let by_channel = summary.by_fulfillment.iter().map(|(f, c)| (f.as_str(), *c));
    let top_countries = summary.top_countries(limits.top_countries).into_iter();

    let sections = [
        ("GENERAL SUMMARY", summary_table(summary)),
        ("ORDERS BY STATUS", breakdown_table("Status", by_status, total)),
        ("ORDERS BY MARKETPLACE", breakdown_table("Marketplace", by_marketplace, total)),
        ("ORDERS BY FULFILLMENT CHANNEL", breakdown_table("Channel", by_channel, total)),
        ("MONTHLY TREND", monthly_table(&report.monthly_trends)),
        (
            "FBA VS FBM",
            segment_table(("FBA", &fulfillment.fba), ("FBM", &fulfillment.fbm)),
        ),
        (
            "FBA VS FBM BY MONTH",
            segment_monthly_table(
                ("FBA", &fulfillment.monthly_fba),
                ("FBM", &fulfillment.monthly_fbm),
            ),
        ),
        (
            "BUSINESS VS CONSUMER",
            segment_table(("Business", &business.business), ("Consumer", &business.consumer)),
        ),
        (
            "BUSINESS VS CONSUMER BY MONTH",
            segment_monthly_table(
                ("Business", &business.monthly_business),
                ("Consumer", &business.monthly_consumer),
            ),
        ),
        ("PROMOTIONS", promotions_table(&report.promotions, limits.top_promotions)),
        ("TOP COUNTRIES", breakdown_table("Country", top_countries, total)),
        ("TOP MARKETS BY MONTH", markets_table(&report.market_monthly, limits.top_markets)),
        ("TOP PRODUCTS BY REVENUE", products_table(&report.products, limits.top_products)),
        ("KEY INSIGHTS", insights_table(&report.insights)),
        ("LOAD AND PARSE AUDIT", audit_table(loaded)),
    ];

    let mut out = String::new();
    for (title, table) in sections {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "\n{title}\n{table}");
    }
    out
}

fn new_table(header: impl Into<Row>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn right(text: impl std::fmt::Display) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn percent(value: Option<Decimal>) -> String {
    match value {
        Some(value) => format!("{:.1}%", value),
        None => "n/a".to_string(),
    }
}

fn share(part: usize, whole: usize) -> Option<Decimal> {
    (whole > 0).then(|| Decimal::from(part) / Decimal::from(whole) * Decimal::ONE_HUNDRED)
}

fn summary_table(summary: &SummaryReport) -> Table {
    let mut table = new_table(vec!["Metric", "Value"]);
    table.add_row(vec![Cell::new("Total orders"), right(summary.total_orders)]);
    table.add_row(vec![Cell::new("Revenue (shipped)"), right(money(summary.total_revenue))]);
    table.add_row(vec![Cell::new("Tax (shipped)"), right(money(summary.total_tax))]);
    table.add_row(vec![Cell::new("Shipping (shipped)"), right(money(summary.total_shipping))]);
    table.add_row(vec![Cell::new("Items sold"), right(summary.total_items_sold)]);
    table
}

fn breakdown_table<'a>(
    label: &str,
    rows: impl Iterator<Item = (&'a str, usize)>,
    total: usize,
) -> Table {
    let mut table = new_table(vec![label, "Orders", "Share"]);
    for (name, count) in rows {
        table.add_row(vec![Cell::new(name), right(count), right(percent(share(count, total)))]);
    }
    table
}

fn monthly_table(trend: &MonthlyTrend) -> Table {
    let mut table = new_table(vec![
        "Month", "Orders", "Shipped", "Cancelled", "Pending", "Items", "Revenue",
    ]);
    for (month, stats) in trend {
        table.add_row(vec![
            Cell::new(month),
            right(stats.orders),
            right(stats.shipped),
            right(stats.cancelled),
            right(stats.pending),
            right(stats.items),
            right(money(stats.revenue)),
        ]);
    }
    table
}

fn segment_table(first: (&str, &SegmentStats), second: (&str, &SegmentStats)) -> Table {
    let mut table = new_table(vec![
        "Segment",
        "Orders",
        "Items",
        "Revenue",
        "Cancelled",
        "Cancel rate",
    ]);
    for (label, stats) in [first, second] {
        table.add_row(vec![
            Cell::new(label),
            right(stats.orders),
            right(stats.items),
            right(money(stats.revenue)),
            right(stats.cancelled),
            right(percent(stats.cancellation_rate_pct())),
        ]);
    }
    table
}

fn segment_monthly_table(
    first: (&str, &BTreeMap<MonthKey, MonthlySegmentStats>),
    second: (&str, &BTreeMap<MonthKey, MonthlySegmentStats>),
) -> Table {
    let mut table = new_table(vec![
        "Month".to_string(),
        format!("{} orders", first.0),
        format!("{} revenue", first.0),
        format!("{} orders", second.0),
        format!("{} revenue", second.0),
    ]);

    let months: BTreeSet<&MonthKey> = first.1.keys().chain(second.1.keys()).collect();
    for month in months {
        let a = first.1.get(month).cloned().unwrap_or_default();
        let b = second.1.get(month).cloned().unwrap_or_default();
        table.add_row(vec![
            Cell::new(month),
            right(a.orders),
            right(money(a.revenue)),
            right(b.orders),
            right(money(b.revenue)),
        ]);
    }
    table
}

fn promotions_table(promotions: &PromotionReport, limit: usize) -> Table {
    let mut table = new_table(vec!["Promotion", "Orders", "Unique SKUs"]);
    for (id, stats) in promotions.top_promotions(limit) {
        table.add_row(vec![Cell::new(id), right(stats.count), right(stats.unique_skus)]);
    }
    table.add_row(vec![
        Cell::new("All promoted orders"),
        right(promotions.total_with_promotions),
        right(promotions.skus_on_promotion.len()),
    ]);
    table
}

fn markets_table(markets: &MarketMonthlyReport, limit: usize) -> Table {
    let top = markets.top_markets(limit);
    let countries: Vec<&str> = top.iter().map(|(country, _)| *country).collect();

    let mut header = vec!["Month".to_string()];
    header.extend(countries.iter().map(|c| c.to_string()));
    let mut table = new_table(header);

    for month in markets.month_axis(countries.iter().copied()) {
        let mut row = vec![Cell::new(month)];
        row.extend(countries.iter().map(|c| right(money(markets.revenue(c, &month)))));
        table.add_row(row);
    }

    let mut totals = vec![Cell::new("Total")];
    totals.extend(top.iter().map(|(_, total)| right(money(*total))));
    table.add_row(totals);
    table
}

fn products_table(products: &[ProductSummary], limit: usize) -> Table {
    let mut table = new_table(vec!["#", "SKU", "Product", "Orders", "Quantity", "Revenue"]);
    for (rank, product) in products.iter().take(limit).enumerate() {
        table.add_row(vec![
            right(rank + 1),
            Cell::new(&product.sku),
            Cell::new(truncate(&product.name, PRODUCT_NAME_WIDTH)),
            right(product.orders_count),
            right(product.total_quantity),
            right(money(product.total_revenue)),
        ]);
    }
    table
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

fn insights_table(insights: &Insights) -> Table {
    let mut table = new_table(vec!["Insight", "Value"]);
    table.add_row(vec![Cell::new("Success rate"), right(percent(insights.success_rate_pct))]);

    let highlights = [
        ("Best month", insights.best_month.as_ref().map(|h| (h.key.to_string(), h.revenue))),
        ("Top market", insights.top_market.as_ref().map(|h| (h.key.clone(), h.revenue))),
        ("Top product", insights.top_product.as_ref().map(|h| (h.key.clone(), h.revenue))),
    ];
    for (label, highlight) in highlights {
        let value = match highlight {
            Some((key, revenue)) => format!("{key} ({})", money(revenue)),
            None => "n/a".to_string(),
        };
        table.add_row(vec![Cell::new(label), right(value)]);
    }

    let aov = insights.average_order_value.map(money).unwrap_or_else(|| "n/a".to_string());
    table.add_row(vec![Cell::new("Average order value"), right(aov)]);
    table
}

fn audit_table(loaded: &LoadedOrders) -> Table {
    let stats = &loaded.stats;
    let mut table = new_table(vec!["Item", "Missing", "Invalid"]);
    table.add_row(vec![Cell::new("Files read"), right(stats.files_read), Cell::new("")]);
    table.add_row(vec![Cell::new("Rows read"), right(stats.rows_read), Cell::new("")]);
    table.add_row(vec![
        Cell::new("Rows without order id"),
        right(stats.rows_missing_id),
        Cell::new(""),
    ]);
    table.add_row(vec![Cell::new("Malformed rows"), Cell::new(""), right(stats.malformed_rows)]);
    for (field, counts) in loaded.audit.fields() {
        table.add_row(vec![Cell::new(field), right(counts.missing), right(counts.invalid)]);
    }
    table
}
