use crate::shared::components::StatTone;
use crate::shared::form::{FieldKind, FormField};
use crate::shared::list_page::{list_page, Column, Facet, ListPageConfig, RowAction, Stat};
use crate::shared::list_utils::{format_hours, format_money, format_percent, options};
use contracts::domain::a004_overtime::{OvertimeEntry, OvertimeEntryPatch, OvertimeSummary};
use contracts::domain::common::format_date;
use contracts::enums::RequestStatus;
use leptos::prelude::*;

fn statuses() -> Vec<(String, String)> {
    options(RequestStatus::all(), RequestStatus::code, RequestStatus::display_name)
}

fn columns() -> Vec<Column<OvertimeEntry>> {
    vec![
        Column::new("date", "Дата", |o: &OvertimeEntry| format_date(o.date)),
        Column::new("employee", "Сотрудник", |o: &OvertimeEntry| o.employee.clone()),
        Column::new("department", "Отдел", |o: &OvertimeEntry| o.department.clone()),
        Column::new("hours", "Часы", |o: &OvertimeEntry| format_hours(o.hours)),
        Column::new("hourlyRate", "Ставка", |o: &OvertimeEntry| format_money(o.hourly_rate)),
        Column::new("amount", "К оплате", |o: &OvertimeEntry| format_money(o.amount())),
        Column::new("status", "Статус", |o: &OvertimeEntry| o.status.display_name().to_string()),
    ]
}

fn stats() -> Vec<Stat<OvertimeSummary>> {
    vec![
        Stat::new("Записей", |s: &OvertimeSummary| s.total.to_string()),
        Stat::new("На рассмотрении", |s: &OvertimeSummary| s.pending.to_string()).with_tone(|s| {
            if s.pending > 0 {
                StatTone::Warning
            } else {
                StatTone::Neutral
            }
        }),
        Stat::new("Всего часов", |s: &OvertimeSummary| format_hours(s.total_hours)),
        Stat::new("Одобрено часов", |s: &OvertimeSummary| format_hours(s.approved_hours))
            .with_tone(|_| StatTone::Good),
        Stat::new("К оплате", |s: &OvertimeSummary| format_money(s.approved_amount)),
        Stat::new("Доля одобренных", |s: &OvertimeSummary| format_percent(s.approval_rate)),
    ]
}

fn form() -> Vec<FormField> {
    vec![
        FormField::new("employee", "Сотрудник", FieldKind::Text),
        FormField::new("department", "Отдел", FieldKind::Text),
        FormField::new("date", "Дата", FieldKind::Date { required: true }),
        FormField::new("hours", "Часы", FieldKind::Number),
        FormField::new("hourlyRate", "Ставка в час", FieldKind::Number),
        FormField::new("reason", "Причина", FieldKind::TextArea),
    ]
}

fn is_pending(o: &OvertimeEntry) -> bool {
    o.status == RequestStatus::Pending
}

fn row_actions() -> Vec<RowAction<OvertimeEntry>> {
    vec![
        RowAction {
            label: "Одобрить",
            visible: is_pending,
            patch: |_: &OvertimeEntry| OvertimeEntryPatch::status(RequestStatus::Approved),
        },
        RowAction {
            label: "Отклонить",
            visible: is_pending,
            patch: |_: &OvertimeEntry| OvertimeEntryPatch::status(RequestStatus::Rejected),
        },
    ]
}

/// Учет сверхурочной работы
#[component]
pub fn OvertimeList() -> impl IntoView {
    list_page(
        ListPageConfig::new(columns())
            .stats(stats())
            .facets(vec![
                Facet::fixed("status", "Статус", statuses),
                Facet::from_records("department", "Отдел"),
            ])
            .form(form())
            .row_actions(row_actions()),
    )
}
