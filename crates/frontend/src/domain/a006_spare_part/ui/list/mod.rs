use crate::shared::components::StatTone;
use crate::shared::form::{FieldKind, FormField};
use crate::shared::list_page::{list_page, Column, Facet, ListPageConfig, RowAction, Stat};
use crate::shared::list_utils::{format_money, format_thousands, options};
use contracts::domain::a006_spare_part::{SparePart, SparePartPatch, SparePartSummary, StockStatus};
use leptos::prelude::*;

fn stock_statuses() -> Vec<(String, String)> {
    options(StockStatus::all(), StockStatus::code, StockStatus::display_name)
}

fn columns() -> Vec<Column<SparePart>> {
    vec![
        Column::new("stockCode", "Код", |p: &SparePart| p.stock_code.clone()),
        Column::new("name", "Наименование", |p: &SparePart| p.name.clone()),
        Column::new("category", "Категория", |p: &SparePart| p.category.clone()),
        Column::new("location", "Ячейка", |p: &SparePart| p.location.clone()),
        Column::new("quantity", "Остаток", |p: &SparePart| p.quantity.to_string()),
        Column::new("minQuantity", "Минимум", |p: &SparePart| p.min_quantity.to_string()),
        Column::new("unitPrice", "Цена", |p: &SparePart| format_money(p.unit_price)),
        Column::new("totalValue", "Сумма", |p: &SparePart| format_money(p.total_value())),
        Column::new("stockStatus", "Состояние", |p: &SparePart| {
            p.stock_status().display_name().to_string()
        }),
        Column::new("supplier", "Поставщик", |p: &SparePart| p.supplier.clone()),
    ]
}

fn stats() -> Vec<Stat<SparePartSummary>> {
    vec![
        Stat::new("Позиций", |s: &SparePartSummary| s.total.to_string()),
        Stat::new("Единиц на складе", |s: &SparePartSummary| format_thousands(s.total_units as i64)),
        Stat::new("Ниже минимума", |s: &SparePartSummary| s.low_stock.to_string()).with_tone(|s| {
            if s.low_stock > 0 {
                StatTone::Warning
            } else {
                StatTone::Neutral
            }
        }),
        Stat::new("Нет в наличии", |s: &SparePartSummary| s.out_of_stock.to_string()).with_tone(|s| {
            if s.out_of_stock > 0 {
                StatTone::Bad
            } else {
                StatTone::Good
            }
        }),
        Stat::new("Стоимость запаса", |s: &SparePartSummary| format_money(s.inventory_value)),
    ]
}

fn form() -> Vec<FormField> {
    vec![
        FormField::new("stockCode", "Код", FieldKind::Text),
        FormField::new("name", "Наименование", FieldKind::Text),
        FormField::new("category", "Категория", FieldKind::Text),
        FormField::new("location", "Ячейка", FieldKind::Text),
        FormField::new("quantity", "Остаток", FieldKind::Number),
        FormField::new("minQuantity", "Минимум", FieldKind::Number),
        FormField::new("unitPrice", "Цена", FieldKind::Number),
        FormField::new("supplier", "Поставщик", FieldKind::Text),
    ]
}

/// Пополнение до двойного минимального запаса
fn restock(p: &SparePart) -> SparePartPatch {
    SparePartPatch::quantity(p.min_quantity.saturating_mul(2).max(p.quantity).max(1))
}

fn row_actions() -> Vec<RowAction<SparePart>> {
    vec![RowAction {
        label: "Пополнить",
        visible: |p: &SparePart| p.stock_status() != StockStatus::Ok,
        patch: restock,
    }]
}

/// Склад запчастей
#[component]
pub fn SparePartList() -> impl IntoView {
    list_page(
        ListPageConfig::new(columns())
            .stats(stats())
            .facets(vec![
                Facet::fixed("stockStatus", "Состояние", stock_statuses),
                Facet::from_records("category", "Категория"),
                Facet::from_records("location", "Ячейка"),
            ])
            .form(form())
            .row_actions(row_actions()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::list::RecordPatch;

    #[test]
    fn test_restock_clears_low_stock() {
        for (quantity, min_quantity) in [(0, 0), (0, 5), (3, 5), (5, 5)] {
            let mut part = SparePart::new("SP-1", "Фильтр", "Фильтры", quantity, min_quantity, 100.0);
            restock(&part).apply_to(&mut part);
            assert_eq!(part.stock_status(), StockStatus::Ok, "{} / {}", quantity, min_quantity);
        }
    }
}
