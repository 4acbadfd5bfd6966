use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::LeaveRequest;
use crate::enums::RequestStatus;
use crate::shared::list::summary::{canonical_order, count_by};
use crate::shared::list::{rate, Summarize, SummaryContext};

/// Сводка по заявкам на отпуск
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    /// approved / (approved + rejected)
    pub approval_rate: f64,
    /// Сумма дней по одобренным заявкам
    pub approved_days: i64,
    pub by_type: BTreeMap<String, usize>,
    pub by_department: BTreeMap<String, usize>,
}

impl Summarize for LeaveRequest {
    type Snapshot = LeaveSummary;

    fn summarize(records: &[Self], _context: &SummaryContext) -> LeaveSummary {
        let ordered = canonical_order(records);
        let count = |status: RequestStatus| ordered.iter().filter(|r| r.status == status).count();

        let approved = count(RequestStatus::Approved);
        let rejected = count(RequestStatus::Rejected);

        LeaveSummary {
            total: records.len(),
            pending: count(RequestStatus::Pending),
            approved,
            rejected,
            approval_rate: rate(approved, approved + rejected),
            approved_days: ordered
                .iter()
                .filter(|r| r.status == RequestStatus::Approved)
                .map(|r| r.days())
                .sum(),
            by_type: count_by(ordered.iter().copied(), |r: &LeaveRequest| {
                r.leave_type.code().to_string()
            }),
            by_department: count_by(ordered.iter().copied(), |r: &LeaveRequest| {
                r.department.clone()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_leave_request::LeaveType;
    use crate::domain::common::{ymd, RecordMeta};

    fn request(id: &str, status: RequestStatus) -> LeaveRequest {
        let mut r = LeaveRequest::new("Сотрудник", "ИТ", LeaveType::Annual, ymd(2024, 1, 1), ymd(2024, 1, 5))
            .with_status(status);
        r.meta = RecordMeta::with_id(id);
        r
    }

    #[test]
    fn test_empty_store_gives_zeros() {
        let summary = LeaveRequest::summarize(&[], &SummaryContext::current());
        assert_eq!(summary, LeaveSummary::default());
        assert_eq!(summary.approval_rate, 0.0);
    }

    #[test]
    fn test_only_pending_rate_is_zero() {
        let records: Vec<_> = (0..5)
            .map(|i| request(&format!("r{}", i), RequestStatus::Pending))
            .collect();
        let summary = LeaveRequest::summarize(&records, &SummaryContext::current());
        assert_eq!(summary.pending, 5);
        assert_eq!(summary.approval_rate, 0.0);
        assert!(!summary.approval_rate.is_nan());
    }

    #[test]
    fn test_counts_and_days() {
        let records = vec![
            request("a", RequestStatus::Approved),
            request("b", RequestStatus::Approved),
            request("c", RequestStatus::Rejected),
            request("d", RequestStatus::Pending),
        ];
        let summary = LeaveRequest::summarize(&records, &SummaryContext::current());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.approved, 2);
        assert_eq!(summary.approved_days, 10);
        assert!((summary.approval_rate - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.by_type.get("annual"), Some(&4));

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(
            LeaveRequest::summarize(&reversed, &SummaryContext::current()),
            summary
        );
    }
}
