use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::{WorkOrder, WorkOrderStatus};
use crate::shared::list::summary::{canonical_order, count_by};
use crate::shared::list::{rate, Summarize, SummaryContext};

/// Сводка по заказ-нарядам
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderSummary {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Незакрытые наряды с прошедшим сроком
    pub overdue: usize,
    /// completed / total
    pub completion_rate: f64,
    /// Оценка трудозатрат по незакрытым нарядам
    pub backlog_hours: f64,
    pub by_priority: BTreeMap<String, usize>,
    pub by_assignee: BTreeMap<String, usize>,
}

impl Summarize for WorkOrder {
    type Snapshot = WorkOrderSummary;

    fn summarize(records: &[Self], context: &SummaryContext) -> WorkOrderSummary {
        let ordered = canonical_order(records);
        let status_count =
            |status: WorkOrderStatus| ordered.iter().filter(|w| w.status == status).count();
        let completed = status_count(WorkOrderStatus::Completed);

        WorkOrderSummary {
            total: records.len(),
            open: status_count(WorkOrderStatus::Open),
            in_progress: status_count(WorkOrderStatus::InProgress),
            completed,
            cancelled: status_count(WorkOrderStatus::Cancelled),
            overdue: ordered
                .iter()
                .filter(|w| w.is_overdue(context.today))
                .count(),
            completion_rate: rate(completed, records.len()),
            backlog_hours: ordered
                .iter()
                .filter(|w| w.status.is_active())
                .map(|w| w.estimated_hours)
                .sum(),
            by_priority: count_by(ordered.iter().copied(), |w: &WorkOrder| {
                w.priority.code().to_string()
            }),
            by_assignee: count_by(ordered.iter().copied(), |w: &WorkOrder| {
                w.assignee.clone()
            }),
        }
    }
}
