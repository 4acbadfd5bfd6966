use crate::shared::components::StatTone;
use crate::shared::form::{FieldKind, FormField};
use crate::shared::list_page::{list_page, Column, Facet, ListPageConfig, RowAction, Stat};
use crate::shared::list_utils::{format_percent, options};
use contracts::domain::a003_leave_request::{LeaveRequest, LeaveRequestPatch, LeaveSummary, LeaveType};
use contracts::domain::common::format_date;
use contracts::enums::RequestStatus;
use leptos::prelude::*;

fn leave_types() -> Vec<(String, String)> {
    options(LeaveType::all(), LeaveType::code, LeaveType::display_name)
}

fn statuses() -> Vec<(String, String)> {
    options(RequestStatus::all(), RequestStatus::code, RequestStatus::display_name)
}

fn columns() -> Vec<Column<LeaveRequest>> {
    vec![
        Column::new("employee", "Сотрудник", |r: &LeaveRequest| r.employee.clone()),
        Column::new("department", "Отдел", |r: &LeaveRequest| r.department.clone()),
        Column::new("leaveType", "Тип", |r: &LeaveRequest| r.leave_type.display_name().to_string()),
        Column::new("startDate", "Начало", |r: &LeaveRequest| format_date(r.start_date)),
        Column::new("endDate", "Окончание", |r: &LeaveRequest| format_date(r.end_date)),
        Column::new("days", "Дней", |r: &LeaveRequest| r.days().to_string()),
        Column::new("status", "Статус", |r: &LeaveRequest| r.status.display_name().to_string()),
        Column::new("reason", "Причина", |r: &LeaveRequest| r.reason.clone()).unsortable(),
    ]
}

fn stats() -> Vec<Stat<LeaveSummary>> {
    vec![
        Stat::new("Всего заявок", |s: &LeaveSummary| s.total.to_string()),
        Stat::new("На рассмотрении", |s: &LeaveSummary| s.pending.to_string()).with_tone(|s| {
            if s.pending > 0 {
                StatTone::Warning
            } else {
                StatTone::Neutral
            }
        }),
        Stat::new("Одобрено", |s: &LeaveSummary| s.approved.to_string()).with_tone(|_| StatTone::Good),
        Stat::new("Отклонено", |s: &LeaveSummary| s.rejected.to_string()),
        Stat::new("Доля одобренных", |s: &LeaveSummary| format_percent(s.approval_rate)),
        Stat::new("Одобрено дней", |s: &LeaveSummary| s.approved_days.to_string()),
    ]
}

fn form() -> Vec<FormField> {
    vec![
        FormField::new("employee", "Сотрудник", FieldKind::Text),
        FormField::new("department", "Отдел", FieldKind::Text),
        FormField::new("leaveType", "Тип отпуска", FieldKind::Select(leave_types)),
        FormField::new("startDate", "Начало", FieldKind::Date { required: true }),
        FormField::new("endDate", "Окончание", FieldKind::Date { required: true }),
        FormField::new("reason", "Причина", FieldKind::TextArea),
    ]
}

fn is_pending(r: &LeaveRequest) -> bool {
    r.status == RequestStatus::Pending
}

fn row_actions() -> Vec<RowAction<LeaveRequest>> {
    vec![
        RowAction {
            label: "Одобрить",
            visible: is_pending,
            patch: |_: &LeaveRequest| LeaveRequestPatch::status(RequestStatus::Approved),
        },
        RowAction {
            label: "Отклонить",
            visible: is_pending,
            patch: |_: &LeaveRequest| LeaveRequestPatch::status(RequestStatus::Rejected),
        },
    ]
}

/// Заявки на отпуск
#[component]
pub fn LeaveRequestList() -> impl IntoView {
    list_page(
        ListPageConfig::new(columns())
            .stats(stats())
            .facets(vec![
                Facet::fixed("status", "Статус", statuses),
                Facet::fixed("leaveType", "Тип", leave_types),
                Facet::from_records("department", "Отдел"),
            ])
            .form(form())
            .row_actions(row_actions()),
    )
}
