use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::OvertimeEntry;
use crate::enums::RequestStatus;
use crate::shared::list::summary::{canonical_order, sum_by};
use crate::shared::list::{rate, Summarize, SummaryContext};

/// Сводка по сверхурочной работе
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total_hours: f64,
    pub approved_hours: f64,
    pub approved_amount: f64,
    pub approval_rate: f64,
    pub hours_by_department: BTreeMap<String, f64>,
}

impl Summarize for OvertimeEntry {
    type Snapshot = OvertimeSummary;

    fn summarize(records: &[Self], _context: &SummaryContext) -> OvertimeSummary {
        let ordered = canonical_order(records);
        let mut summary = OvertimeSummary {
            total: records.len(),
            ..OvertimeSummary::default()
        };

        for entry in &ordered {
            summary.total_hours += entry.hours;
            match entry.status {
                RequestStatus::Pending => summary.pending += 1,
                RequestStatus::Approved => {
                    summary.approved += 1;
                    summary.approved_hours += entry.hours;
                    summary.approved_amount += entry.amount();
                }
                RequestStatus::Rejected => summary.rejected += 1,
            }
        }

        summary.approval_rate = rate(summary.approved, summary.approved + summary.rejected);
        summary.hours_by_department = sum_by(
            ordered.iter().copied(),
            |e: &OvertimeEntry| e.department.clone(),
            |e: &OvertimeEntry| e.hours,
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{ymd, RecordMeta};

    fn entry(id: &str, department: &str, hours: f64, status: RequestStatus) -> OvertimeEntry {
        let mut e = OvertimeEntry::new("Сотрудник", department, ymd(2024, 2, 1), hours, 200.0)
            .with_status(status);
        e.meta = RecordMeta::with_id(id);
        e
    }

    #[test]
    fn test_empty() {
        let summary = OvertimeEntry::summarize(&[], &SummaryContext::current());
        assert_eq!(summary, OvertimeSummary::default());
    }

    #[test]
    fn test_hours_and_amounts() {
        let records = vec![
            entry("1", "ИТ", 2.0, RequestStatus::Approved),
            entry("2", "ИТ", 3.0, RequestStatus::Pending),
            entry("3", "Склад", 1.5, RequestStatus::Rejected),
            entry("4", "Склад", 4.0, RequestStatus::Approved),
        ];
        let summary = OvertimeEntry::summarize(&records, &SummaryContext::current());
        assert_eq!(summary.total_hours, 10.5);
        assert_eq!(summary.approved_hours, 6.0);
        assert_eq!(summary.approved_amount, 6.0 * 200.0 * 1.5);
        assert!((summary.approval_rate - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.hours_by_department.get("ИТ"), Some(&5.0));
        assert_eq!(summary.hours_by_department.get("Склад"), Some(&5.5));
    }

    #[test]
    fn test_independent_of_order() {
        let mut records = vec![
            entry("x", "ИТ", 0.1, RequestStatus::Approved),
            entry("y", "ИТ", 0.2, RequestStatus::Approved),
            entry("z", "ИТ", 0.3, RequestStatus::Approved),
        ];
        let first = OvertimeEntry::summarize(&records, &SummaryContext::current());
        records.rotate_left(1);
        let second = OvertimeEntry::summarize(&records, &SummaryContext::current());
        assert_eq!(first, second);
    }
}
