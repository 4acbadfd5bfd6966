use super::aggregate::Quotation;
use crate::domain::common::format_date;
use crate::shared::export::{DocumentModel, DocumentTemplate};

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Печатная форма коммерческого предложения
pub fn quotation_document(quote: &Quotation, template: DocumentTemplate) -> DocumentModel {
    let title = if quote.number.is_empty() {
        "Коммерческое предложение".to_string()
    } else {
        format!("Коммерческое предложение № {}", quote.number)
    };

    let mut details = vec![
        ("Клиент".to_string(), quote.client.clone()),
        ("Дата".to_string(), format_date(quote.issue_date)),
        ("Действует до".to_string(), format_date(quote.valid_until)),
    ];
    if !quote.client_email.is_empty() {
        details.insert(1, ("Email".to_string(), quote.client_email.clone()));
    }

    let headers = ["№", "Описание", "Кол-во", "Цена", "Сумма"]
        .into_iter()
        .map(str::to_string)
        .collect();
    let rows = quote
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            vec![
                (i + 1).to_string(),
                line.description.clone(),
                format!("{}", line.quantity),
                money(line.unit_price),
                money(line.amount()),
            ]
        })
        .collect();

    let mut document = DocumentModel::new(title.clone(), template)
        .heading(title)
        .key_values(details)
        .table(headers, rows)
        .key_values(vec![
            ("Сумма без налога".to_string(), money(quote.subtotal())),
            (format!("Налог ({}%)", quote.tax_rate), money(quote.tax())),
            ("Итого".to_string(), money(quote.total())),
        ]);

    if !quote.notes.trim().is_empty() {
        document = document.heading("Примечания").paragraph(quote.notes.clone());
    }
    document
}
