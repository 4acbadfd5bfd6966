use crate::shared::components::StatTone;
use crate::shared::form::{FieldKind, FormField};
use crate::shared::list_page::{list_page, Column, Facet, ListPageConfig, RowAction, Stat};
use crate::shared::list_utils::{format_hours, format_percent, options};
use chrono::Utc;
use contracts::domain::a007_work_order::{
    Priority, WorkOrder, WorkOrderPatch, WorkOrderStatus, WorkOrderSummary,
};
use contracts::domain::common::format_optional_date;
use leptos::prelude::*;

fn priorities() -> Vec<(String, String)> {
    options(Priority::all(), Priority::code, Priority::display_name)
}

fn statuses() -> Vec<(String, String)> {
    options(WorkOrderStatus::all(), WorkOrderStatus::code, WorkOrderStatus::display_name)
}

fn due_label(w: &WorkOrder) -> String {
    let date = format_optional_date(w.due_date);
    if w.is_overdue(Utc::now().date_naive()) {
        format!("{} (просрочен)", date)
    } else {
        date
    }
}

fn columns() -> Vec<Column<WorkOrder>> {
    vec![
        Column::new("number", "Номер", |w: &WorkOrder| w.number.clone()),
        Column::new("title", "Работа", |w: &WorkOrder| w.title.clone()),
        Column::new("equipment", "Оборудование", |w: &WorkOrder| w.equipment.clone()),
        Column::new("priority", "Приоритет", |w: &WorkOrder| w.priority.display_name().to_string()),
        Column::new("status", "Статус", |w: &WorkOrder| w.status.display_name().to_string()),
        Column::new("assignee", "Исполнитель", |w: &WorkOrder| w.assignee.clone()),
        Column::new("dueDate", "Срок", due_label),
        Column::new("completedAt", "Выполнен", |w: &WorkOrder| format_optional_date(w.completed_at)),
        Column::new("estimatedHours", "Оценка", |w: &WorkOrder| format_hours(w.estimated_hours)),
    ]
}

fn stats() -> Vec<Stat<WorkOrderSummary>> {
    vec![
        Stat::new("Нарядов", |s: &WorkOrderSummary| s.total.to_string()),
        Stat::new("Открыто", |s: &WorkOrderSummary| s.open.to_string()),
        Stat::new("В работе", |s: &WorkOrderSummary| s.in_progress.to_string()),
        Stat::new("Просрочено", |s: &WorkOrderSummary| s.overdue.to_string()).with_tone(|s| {
            if s.overdue > 0 {
                StatTone::Bad
            } else {
                StatTone::Good
            }
        }),
        Stat::new("Выполнено", |s: &WorkOrderSummary| format_percent(s.completion_rate))
            .with_tone(|_| StatTone::Good),
        Stat::new("Часов в очереди", |s: &WorkOrderSummary| format_hours(s.backlog_hours)),
    ]
}

fn form() -> Vec<FormField> {
    vec![
        FormField::new("number", "Номер", FieldKind::Text),
        FormField::new("title", "Работа", FieldKind::Text),
        FormField::new("equipment", "Оборудование", FieldKind::Text),
        FormField::new("priority", "Приоритет", FieldKind::Select(priorities)),
        FormField::new("assignee", "Исполнитель", FieldKind::Text),
        FormField::new("dueDate", "Срок", FieldKind::Date { required: false }),
        FormField::new("estimatedHours", "Оценка, ч", FieldKind::Number),
        FormField::new("description", "Описание", FieldKind::TextArea),
    ]
}

fn row_actions() -> Vec<RowAction<WorkOrder>> {
    vec![
        RowAction {
            label: "В работу",
            visible: |w: &WorkOrder| w.status == WorkOrderStatus::Open,
            patch: |_: &WorkOrder| WorkOrderPatch {
                status: Some(WorkOrderStatus::InProgress),
                ..WorkOrderPatch::default()
            },
        },
        RowAction {
            label: "Выполнен",
            visible: |w: &WorkOrder| w.status.is_active(),
            patch: |_: &WorkOrder| WorkOrderPatch::complete(Utc::now().date_naive()),
        },
    ]
}

/// Заказ-наряды на обслуживание
#[component]
pub fn WorkOrderList() -> impl IntoView {
    list_page(
        ListPageConfig::new(columns())
            .stats(stats())
            .facets(vec![
                Facet::fixed("status", "Статус", statuses),
                Facet::fixed("priority", "Приоритет", priorities),
                Facet::from_records("assignee", "Исполнитель"),
            ])
            .form(form())
            .row_actions(row_actions()),
    )
}
