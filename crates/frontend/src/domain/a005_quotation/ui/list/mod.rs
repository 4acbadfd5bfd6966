use crate::shared::components::StatTone;
use crate::shared::form::{FieldKind, FormField};
use crate::shared::list_page::{list_page, Column, Facet, ListPageConfig, RowAction, Stat};
use crate::shared::list_utils::{format_money, format_percent, options};
use contracts::domain::a005_quotation::{
    quotation_document, Quotation, QuotationPatch, QuotationStatus, QuotationSummary,
};
use contracts::domain::common::format_date;
use leptos::prelude::*;
use serde_json::{json, Map, Value};

fn statuses() -> Vec<(String, String)> {
    options(QuotationStatus::all(), QuotationStatus::code, QuotationStatus::display_name)
}

fn columns() -> Vec<Column<Quotation>> {
    vec![
        Column::new("number", "Номер", |q: &Quotation| q.number.clone()),
        Column::new("client", "Клиент", |q: &Quotation| q.client.clone()),
        Column::new("issueDate", "Дата", |q: &Quotation| format_date(q.issue_date)),
        Column::new("validUntil", "Действует до", |q: &Quotation| format_date(q.valid_until)),
        Column::new("status", "Статус", |q: &Quotation| q.status.display_name().to_string()),
        Column::new("subtotal", "Без налога", |q: &Quotation| format_money(q.subtotal())),
        Column::new("total", "Итого", |q: &Quotation| format_money(q.total())),
    ]
}

fn stats() -> Vec<Stat<QuotationSummary>> {
    vec![
        Stat::new("Предложений", |s: &QuotationSummary| s.total.to_string()),
        Stat::new("Сумма предложений", |s: &QuotationSummary| format_money(s.total_value)),
        Stat::new("Принято на сумму", |s: &QuotationSummary| format_money(s.accepted_value))
            .with_tone(|_| StatTone::Good),
        Stat::new("Конверсия", |s: &QuotationSummary| format_percent(s.acceptance_rate)),
        Stat::new("Истекают", |s: &QuotationSummary| s.expiring.to_string()).with_tone(|s| {
            if s.expiring > 0 {
                StatTone::Warning
            } else {
                StatTone::Neutral
            }
        }),
    ]
}

/// Поле `lines` формы содержит описание единственной позиции
fn form() -> Vec<FormField> {
    vec![
        FormField::new("number", "Номер", FieldKind::Text),
        FormField::new("client", "Клиент", FieldKind::Text),
        FormField::new("clientEmail", "Email клиента", FieldKind::Text),
        FormField::new("issueDate", "Дата", FieldKind::Date { required: true }),
        FormField::new("validUntil", "Действует до", FieldKind::Date { required: true }),
        FormField::new("status", "Статус", FieldKind::Select(statuses)),
        FormField::new("lines", "Позиция", FieldKind::Text),
        FormField::new("lineQuantity", "Количество", FieldKind::Number),
        FormField::new("lineUnitPrice", "Цена за единицу", FieldKind::Number),
        FormField::new("taxRate", "Ставка налога, %", FieldKind::Number),
        FormField::new("notes", "Примечание", FieldKind::TextArea),
    ]
}

/// Поля позиции формы -> массив `lines` записи
///
/// Без описания позиции `lines` не передается: новая запись получает пустой
/// список (его отклонит валидация), при правке позиции остаются прежними.
fn collect_line(map: &mut Map<String, Value>) {
    let description = match map.remove("lines") {
        Some(Value::String(text)) => text,
        _ => String::new(),
    };
    let quantity = map.remove("lineQuantity").unwrap_or_else(|| json!(1));
    let unit_price = map.remove("lineUnitPrice").unwrap_or_else(|| json!(0));

    if !description.trim().is_empty() {
        let line = json!({
            "description": description,
            "quantity": quantity,
            "unitPrice": unit_price,
        });
        map.insert("lines".to_string(), Value::Array(vec![line]));
    }
}

/// Единственная позиция записи -> поля позиции формы
///
/// Несколько позиций в форму не помещаются, поля остаются пустыми.
fn spread_line(map: &mut Map<String, Value>) {
    let line = match map.remove("lines") {
        Some(Value::Array(mut lines)) if lines.len() == 1 => lines.pop(),
        _ => None,
    };
    if let Some(Value::Object(mut line)) = line {
        for (from, to) in [
            ("description", "lines"),
            ("quantity", "lineQuantity"),
            ("unitPrice", "lineUnitPrice"),
        ] {
            if let Some(value) = line.remove(from) {
                map.insert(to.to_string(), value);
            }
        }
    }
}

fn row_actions() -> Vec<RowAction<Quotation>> {
    vec![
        RowAction {
            label: "Отправлено",
            visible: |q: &Quotation| q.status == QuotationStatus::Draft,
            patch: |_: &Quotation| QuotationPatch::status(QuotationStatus::Sent),
        },
        RowAction {
            label: "Принято",
            visible: |q: &Quotation| q.status == QuotationStatus::Sent,
            patch: |_: &Quotation| QuotationPatch::status(QuotationStatus::Accepted),
        },
        RowAction {
            label: "Отказ",
            visible: |q: &Quotation| q.status == QuotationStatus::Sent,
            patch: |_: &Quotation| QuotationPatch::status(QuotationStatus::Rejected),
        },
    ]
}

/// Коммерческие предложения
#[component]
pub fn QuotationList() -> impl IntoView {
    list_page(
        ListPageConfig::new(columns())
            .stats(stats())
            .facets(vec![
                Facet::fixed("status", "Статус", statuses),
                Facet::from_records("client", "Клиент"),
            ])
            .form(form())
            .prepare(collect_line)
            .spread(spread_line)
            .row_actions(row_actions())
            .document(quotation_document),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::{build_patch, build_record, record_to_form};
    use contracts::domain::a005_quotation::QuotationLine;
    use contracts::domain::common::ymd;
    use contracts::shared::list::{ListRecord, RecordPatch};
    use std::collections::HashMap;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_form_builds_single_line_quotation() {
        let quote: Quotation = build_record(
            &form(),
            &values(&[
                ("number", "КП-100"),
                ("client", "ООО Ромашка"),
                ("issueDate", "2024-03-01"),
                ("validUntil", "2024-03-31"),
                ("status", "draft"),
                ("lines", "Монтаж"),
                ("lineQuantity", "2"),
                ("lineUnitPrice", "1500,5"),
                ("taxRate", "20"),
            ]),
            Some(collect_line),
        )
        .unwrap();
        assert_eq!(quote.issue_date, ymd(2024, 3, 1));
        assert_eq!(quote.lines.len(), 1);
        assert_eq!(quote.lines[0].description, "Монтаж");
        assert!((quote.subtotal() - 3001.0).abs() < 1e-9);
        assert!(quote.validate().is_ok());
    }

    #[test]
    fn test_empty_line_is_reported_on_lines_field() {
        let quote: Quotation = build_record(
            &form(),
            &values(&[
                ("client", "ООО Ромашка"),
                ("issueDate", "2024-03-01"),
                ("validUntil", "2024-03-31"),
                ("status", "draft"),
            ]),
            Some(collect_line),
        )
        .unwrap();
        assert!(quote.lines.is_empty());
        let errors = quote.validate().unwrap_err();
        assert!(errors.get("lines").is_some());
    }

    fn quote(lines: Vec<QuotationLine>) -> Quotation {
        let mut values = values(&[
            ("number", "КП-7"),
            ("client", "ООО Ромашка"),
            ("issueDate", "2024-03-01"),
            ("validUntil", "2024-03-31"),
            ("status", "draft"),
            ("lines", "Монтаж"),
        ]);
        values.insert("taxRate".into(), "20".into());
        let mut quote: Quotation = build_record(&form(), &values, Some(collect_line)).unwrap();
        quote.lines = lines;
        quote
    }

    fn line(description: &str, quantity: f64, unit_price: f64) -> QuotationLine {
        QuotationLine {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_single_line_fills_edit_form() {
        let quote = quote(vec![line("Монтаж", 2.0, 1500.5)]);
        let values = record_to_form(&form(), &quote, Some(spread_line));
        assert_eq!(values["lines"], "Монтаж");
        assert_eq!(values["lineQuantity"], "2.0");
        assert_eq!(values["lineUnitPrice"], "1500.5");
        assert_eq!(values["client"], "ООО Ромашка");

        let mut values = values;
        values.insert("lineQuantity".into(), "3".into());
        let mut edited = quote.clone();
        build_patch::<Quotation>(&form(), &values, Some(collect_line))
            .unwrap()
            .apply_to(&mut edited);
        assert_eq!(edited.lines, vec![line("Монтаж", 3.0, 1500.5)]);
    }

    #[test]
    fn test_edit_keeps_multiple_lines() {
        let lines = vec![line("Монтаж", 1.0, 100.0), line("Наладка", 2.0, 50.0)];
        let quote = quote(lines.clone());
        let mut values = record_to_form(&form(), &quote, Some(spread_line));
        assert_eq!(values["lines"], "");

        values.insert("client".into(), "ООО Лютик".into());
        let mut edited = quote.clone();
        build_patch::<Quotation>(&form(), &values, Some(collect_line))
            .unwrap()
            .apply_to(&mut edited);
        assert_eq!(edited.client, "ООО Лютик");
        assert_eq!(edited.lines, lines);
    }
}
