use crate::shared::components::StatTone;
use crate::shared::form::{FieldKind, FormField};
use crate::shared::list_page::{list_page, Column, Facet, ListPageConfig, Stat};
use crate::shared::list_utils::{format_money, format_thousands, options};
use contracts::domain::a002_product::{Product, ProductStatus, ProductSummary, StockLevel};
use leptos::prelude::*;

fn statuses() -> Vec<(String, String)> {
    options(ProductStatus::all(), ProductStatus::code, ProductStatus::display_name)
}

fn stock_levels() -> Vec<(String, String)> {
    options(StockLevel::all(), StockLevel::code, StockLevel::display_name)
}

fn columns() -> Vec<Column<Product>> {
    vec![
        Column::new("sku", "Артикул", |p: &Product| p.sku.clone()),
        Column::new("name", "Наименование", |p: &Product| p.name.clone()),
        Column::new("category", "Категория", |p: &Product| p.category.clone()),
        Column::new("price", "Цена", |p: &Product| format_money(p.price)),
        Column::new("stock", "Остаток", |p: &Product| format_thousands(i64::from(p.stock))),
        Column::new("stockLevel", "Наличие", |p: &Product| p.stock_level().display_name().to_string()),
        Column::new("status", "Статус", |p: &Product| p.status.display_name().to_string()),
    ]
}

fn stats() -> Vec<Stat<ProductSummary>> {
    vec![
        Stat::new("Товаров", |s: &ProductSummary| s.total.to_string()),
        Stat::new("В продаже", |s: &ProductSummary| s.active.to_string()).with_tone(|_| StatTone::Good),
        Stat::new("Единиц на складе", |s: &ProductSummary| format_thousands(s.units_in_stock as i64)),
        Stat::new("Заканчиваются", |s: &ProductSummary| s.low_stock.to_string()).with_tone(|s| {
            if s.low_stock > 0 {
                StatTone::Warning
            } else {
                StatTone::Neutral
            }
        }),
        Stat::new("Нет в наличии", |s: &ProductSummary| s.out_of_stock.to_string()).with_tone(|s| {
            if s.out_of_stock > 0 {
                StatTone::Bad
            } else {
                StatTone::Neutral
            }
        }),
        Stat::new("Стоимость запасов", |s: &ProductSummary| format_money(s.inventory_value)),
        Stat::new("Средняя цена", |s: &ProductSummary| format_money(s.average_price)),
    ]
}

fn form() -> Vec<FormField> {
    vec![
        FormField::new("name", "Наименование", FieldKind::Text),
        FormField::new("sku", "Артикул", FieldKind::Text),
        FormField::new("category", "Категория", FieldKind::Text),
        FormField::new("price", "Цена", FieldKind::Number),
        FormField::new("stock", "Остаток", FieldKind::Number),
        FormField::new("status", "Статус", FieldKind::Select(statuses)),
        FormField::new("description", "Описание", FieldKind::TextArea),
    ]
}

/// Каталог товаров
#[component]
pub fn ProductList() -> impl IntoView {
    list_page(
        ListPageConfig::new(columns())
            .stats(stats())
            .facets(vec![
                Facet::fixed("status", "Статус", statuses),
                Facet::fixed("stockLevel", "Наличие", stock_levels),
                Facet::from_records("category", "Категория"),
            ])
            .form(form()),
    )
}
