use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::{Product, ProductStatus, StockLevel};
use crate::shared::list::summary::{canonical_order, count_by};
use crate::shared::list::{Summarize, SummaryContext};

/// Сводка по товарам витрины
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub total: usize,
    pub active: usize,
    pub draft: usize,
    pub archived: usize,
    pub units_in_stock: u64,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub inventory_value: f64,
    pub average_price: f64,
    pub by_category: BTreeMap<String, usize>,
}

impl Summarize for Product {
    type Snapshot = ProductSummary;

    fn summarize(records: &[Self], _context: &SummaryContext) -> ProductSummary {
        let ordered = canonical_order(records);
        let status_count =
            |status: ProductStatus| ordered.iter().filter(|p| p.status == status).count();
        let level_count =
            |level: StockLevel| ordered.iter().filter(|p| p.stock_level() == level).count();

        let price_total: f64 = ordered.iter().map(|p| p.price).sum();
        let average_price = if records.is_empty() {
            0.0
        } else {
            price_total / records.len() as f64
        };

        ProductSummary {
            total: records.len(),
            active: status_count(ProductStatus::Active),
            draft: status_count(ProductStatus::Draft),
            archived: status_count(ProductStatus::Archived),
            units_in_stock: ordered.iter().map(|p| u64::from(p.stock)).sum(),
            low_stock: level_count(StockLevel::LowStock),
            out_of_stock: level_count(StockLevel::OutOfStock),
            inventory_value: ordered.iter().map(|p| p.inventory_value()).sum(),
            average_price,
            by_category: count_by(ordered.iter().copied(), |p: &Product| p.category.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let summary = Product::summarize(&[], &SummaryContext::current());
        assert_eq!(summary, ProductSummary::default());
    }

    #[test]
    fn test_stock_counters() {
        let records = vec![
            Product::new("Платье", "DR-1", "Одежда", 5000.0, 10),
            Product::new("Сумка", "BG-1", "Аксессуары", 3000.0, 3),
            Product::new("Ремень", "BL-1", "Аксессуары", 1000.0, 0),
        ];
        let summary = Product::summarize(&records, &SummaryContext::current());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.units_in_stock, 13);
        assert_eq!(summary.low_stock, 1);
        assert_eq!(summary.out_of_stock, 1);
        assert_eq!(summary.inventory_value, 59000.0);
        assert_eq!(summary.average_price, 3000.0);
        assert_eq!(summary.by_category.get("Аксессуары"), Some(&2));
    }
}
