use crate::Aggregator;
use core_types::OrderRecord;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Rollup of every line sold under one SKU.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub sku: String,
    /// First non-empty product name seen for the SKU, in record order.
    pub name: String,
    pub orders_count: usize,
    pub total_quantity: i64,
    /// Shipped lines only.
    pub total_revenue: Decimal,
}

impl ProductSummary {
    fn new(sku: &str) -> Self {
        Self {
            sku: sku.to_string(),
            name: String::new(),
            orders_count: 0,
            total_quantity: 0,
            total_revenue: Decimal::ZERO,
        }
    }
}

/// Ranks SKUs by shipped revenue.
///
/// The output is sorted descending by `total_revenue`. Equal revenues keep the
/// order in which their SKUs first appeared, so a top-N cut is stable across runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductAggregator;

impl Aggregator for ProductAggregator {
    type Output = Vec<ProductSummary>;

    fn name(&self) -> &'static str {
        "products"
    }

    fn aggregate(&self, records: &[OrderRecord]) -> Vec<ProductSummary> {
        // Products live in first-appearance order; the index map only locates them.
        let mut products: Vec<ProductSummary> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for record in records.iter().filter(|r| r.has_known_sku()) {
            let slot = *index.entry(record.sku.as_str()).or_insert_with(|| {
                products.push(ProductSummary::new(&record.sku));
                products.len() - 1
            });
            let product = &mut products[slot];

            if product.name.is_empty() && !record.product_name.is_empty() {
                product.name = record.product_name.clone();
            }
            product.orders_count += 1;
            product.total_quantity = product.total_quantity.saturating_add(record.quantity);
            product.total_revenue = product.total_revenue.saturating_add(record.shipped_revenue());
        }

        // `sort_by` is stable.
        products.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
        products
    }
}
