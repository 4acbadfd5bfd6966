use crate::shared::components::StatTone;
use crate::shared::form::{FieldKind, FormField};
use crate::shared::list_page::{list_page, Column, Facet, ListPageConfig, RowAction, Stat};
use crate::shared::list_utils::{format_money, format_percent, options};
use contracts::domain::a001_equipment::{Equipment, EquipmentPatch, EquipmentStatus, EquipmentSummary};
use contracts::domain::common::format_optional_date;
use leptos::prelude::*;

fn statuses() -> Vec<(String, String)> {
    options(EquipmentStatus::all(), EquipmentStatus::code, EquipmentStatus::display_name)
}

fn columns() -> Vec<Column<Equipment>> {
    vec![
        Column::new("name", "Наименование", |e: &Equipment| e.name.clone()),
        Column::new("serialNumber", "Серийный номер", |e: &Equipment| e.serial_number.clone()),
        Column::new("category", "Категория", |e: &Equipment| e.category.clone()),
        Column::new("location", "Расположение", |e: &Equipment| e.location.clone()),
        Column::new("status", "Статус", |e: &Equipment| e.status.display_name().to_string()),
        Column::new("responsible", "Ответственный", |e: &Equipment| e.responsible.clone()),
        Column::new("purchaseDate", "Дата покупки", |e: &Equipment| format_optional_date(e.purchase_date)),
        Column::new("value", "Стоимость", |e: &Equipment| format_money(e.value)),
    ]
}

fn stats() -> Vec<Stat<EquipmentSummary>> {
    vec![
        Stat::new("Всего единиц", |s: &EquipmentSummary| s.total.to_string()),
        Stat::new("Доступно", |s: &EquipmentSummary| s.available.to_string()).with_tone(|_| StatTone::Good),
        Stat::new("Используется", |s: &EquipmentSummary| s.in_use.to_string()),
        Stat::new("На обслуживании", |s: &EquipmentSummary| s.maintenance.to_string()).with_tone(|s| {
            if s.maintenance > 0 {
                StatTone::Warning
            } else {
                StatTone::Neutral
            }
        }),
        Stat::new("Доступность", |s: &EquipmentSummary| format_percent(s.availability_rate)),
        Stat::new("Балансовая стоимость", |s: &EquipmentSummary| format_money(s.total_value)),
    ]
}

fn form() -> Vec<FormField> {
    vec![
        FormField::new("name", "Наименование", FieldKind::Text),
        FormField::new("serialNumber", "Серийный номер", FieldKind::Text),
        FormField::new("category", "Категория", FieldKind::Text),
        FormField::new("location", "Расположение", FieldKind::Text),
        FormField::new("status", "Статус", FieldKind::Select(statuses)),
        FormField::new("responsible", "Ответственный", FieldKind::Text),
        FormField::new("purchaseDate", "Дата покупки", FieldKind::Date { required: false }),
        FormField::new("value", "Стоимость", FieldKind::Number),
    ]
}

fn row_actions() -> Vec<RowAction<Equipment>> {
    vec![
        RowAction {
            label: "На обслуживание",
            visible: |e: &Equipment| e.status != EquipmentStatus::Maintenance && e.status != EquipmentStatus::OutOfService,
            patch: |_: &Equipment| EquipmentPatch::status(EquipmentStatus::Maintenance),
        },
        RowAction {
            label: "Вернуть в работу",
            visible: |e: &Equipment| e.status == EquipmentStatus::Maintenance,
            patch: |_: &Equipment| EquipmentPatch::status(EquipmentStatus::Available),
        },
    ]
}

/// Список оборудования
#[component]
pub fn EquipmentList() -> impl IntoView {
    list_page(
        ListPageConfig::new(columns())
            .stats(stats())
            .facets(vec![
                Facet::fixed("status", "Статус", statuses),
                Facet::from_records("category", "Категория"),
                Facet::from_records("location", "Расположение"),
            ])
            .form(form())
            .row_actions(row_actions()),
    )
}
