use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::Equipment;
use crate::shared::list::summary::{canonical_order, count_by};
use crate::shared::list::{rate, Summarize, SummaryContext};

/// Сводка по оборудованию
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSummary {
    pub total: usize,
    pub available: usize,
    pub in_use: usize,
    pub maintenance: usize,
    pub out_of_service: usize,
    /// Доля доступных единиц
    pub availability_rate: f64,
    pub total_value: f64,
    pub by_category: BTreeMap<String, usize>,
    pub by_location: BTreeMap<String, usize>,
}

impl Summarize for Equipment {
    type Snapshot = EquipmentSummary;

    fn summarize(records: &[Self], _context: &SummaryContext) -> EquipmentSummary {
        let ordered = canonical_order(records);
        let by_status = count_by(ordered.iter().copied(), |e: &Equipment| {
            e.status.code().to_string()
        });
        let status_count = |code: &str| by_status.get(code).copied().unwrap_or(0);
        let available = status_count("available");

        EquipmentSummary {
            total: records.len(),
            available,
            in_use: status_count("in_use"),
            maintenance: status_count("maintenance"),
            out_of_service: status_count("out_of_service"),
            availability_rate: rate(available, records.len()),
            total_value: ordered.iter().map(|e| e.value).sum(),
            by_category: count_by(ordered.iter().copied(), |e: &Equipment| e.category.clone()),
            by_location: count_by(ordered.iter().copied(), |e: &Equipment| e.location.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_equipment::EquipmentStatus;

    #[test]
    fn test_empty() {
        let summary = Equipment::summarize(&[], &SummaryContext::current());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.availability_rate, 0.0);
    }

    #[test]
    fn test_counts_by_status_and_category() {
        let mut drill = Equipment::new("Дрель", "Инструмент", "Цех 1", EquipmentStatus::Available);
        drill.value = 100.0;
        let mut saw = Equipment::new("Пила", "Инструмент", "Цех 2", EquipmentStatus::InUse);
        saw.value = 250.0;
        let lift = Equipment::new("Подъемник", "Техника", "Цех 1", EquipmentStatus::Maintenance);
        let old = Equipment::new("Станок", "Техника", "Склад", EquipmentStatus::Available);

        let summary = Equipment::summarize(&[drill, saw, lift, old], &SummaryContext::current());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.available, 2);
        assert_eq!(summary.in_use, 1);
        assert_eq!(summary.maintenance, 1);
        assert_eq!(summary.out_of_service, 0);
        assert_eq!(summary.availability_rate, 0.5);
        assert_eq!(summary.total_value, 350.0);
        assert_eq!(summary.by_category.get("Инструмент"), Some(&2));
        assert_eq!(summary.by_location.get("Цех 1"), Some(&2));
    }
}
