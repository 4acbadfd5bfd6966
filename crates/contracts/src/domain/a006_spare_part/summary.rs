use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::{SparePart, StockStatus};
use crate::shared::list::summary::{canonical_order, count_by, sum_by};
use crate::shared::list::{Summarize, SummaryContext};

/// Сводка по складу запчастей
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparePartSummary {
    pub total: usize,
    pub total_units: u64,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub inventory_value: f64,
    pub by_category: BTreeMap<String, usize>,
    pub value_by_category: BTreeMap<String, f64>,
}

impl Summarize for SparePart {
    type Snapshot = SparePartSummary;

    fn summarize(records: &[Self], _context: &SummaryContext) -> SparePartSummary {
        let ordered = canonical_order(records);
        let status_count =
            |status: StockStatus| ordered.iter().filter(|p| p.stock_status() == status).count();

        SparePartSummary {
            total: records.len(),
            total_units: ordered.iter().map(|p| u64::from(p.quantity)).sum(),
            low_stock: status_count(StockStatus::Low),
            out_of_stock: status_count(StockStatus::OutOfStock),
            inventory_value: ordered.iter().map(|p| p.total_value()).sum(),
            by_category: count_by(ordered.iter().copied(), |p: &SparePart| p.category.clone()),
            value_by_category: sum_by(
                ordered.iter().copied(),
                |p: &SparePart| p.category.clone(),
                |p: &SparePart| p.total_value(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let summary = SparePart::summarize(&[], &SummaryContext::current());
        assert_eq!(summary, SparePartSummary::default());
    }

    #[test]
    fn test_low_and_out_of_stock() {
        let records = vec![
            SparePart::new("A-1", "Ремень", "Приводы", 0, 2, 300.0),
            SparePart::new("A-2", "Шкив", "Приводы", 2, 2, 500.0),
            SparePart::new("B-1", "Фильтр", "Фильтры", 10, 4, 50.0),
        ];
        let summary = SparePart::summarize(&records, &SummaryContext::current());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.total_units, 12);
        assert_eq!(summary.out_of_stock, 1);
        assert_eq!(summary.low_stock, 1);
        assert_eq!(summary.inventory_value, 1500.0);
        assert_eq!(summary.value_by_category.get("Приводы"), Some(&1000.0));
    }
}
