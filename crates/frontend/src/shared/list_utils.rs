/// Утилиты страниц-списков: индикатор сортировки, форматирование, варианты фильтров
use contracts::shared::list::value::compare_text;
use contracts::shared::list::{ListRecord, SortState};

/// Индикатор сортировки для заголовка колонки
pub fn sort_indicator(sort: Option<&SortState>, field: &str) -> &'static str {
    match sort {
        Some(s) if s.field == field => {
            if s.direction.is_ascending() {
                " ▲"
            } else {
                " ▼"
            }
        }
        _ => " ⇅",
    }
}

/// Разделение разрядов неразрывным пробелом: 1 234 567
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\u{00a0}');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Денежная сумма: 1 234,50 ₽
pub fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!(
        "{}{},{:02}\u{00a0}₽",
        sign,
        format_thousands(abs / 100),
        abs % 100
    )
}

/// Доля 0..1 в процентах: 0.4567 -> "45,7%"
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0).replace('.', ",")
}

/// Часы с одним знаком: 12,5 ч
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}\u{00a0}ч", hours).replace('.', ",")
}

/// Варианты перечисления для фильтров и форм: (код, подпись)
pub fn options<C>(
    items: Vec<C>,
    code: impl Fn(&C) -> &'static str,
    label: impl Fn(&C) -> &'static str,
) -> Vec<(String, String)> {
    items
        .iter()
        .map(|item| (code(item).to_string(), label(item).to_string()))
        .collect()
}

/// Различные значения поля в записях (для фильтров по свободному тексту)
pub fn distinct_values<T: ListRecord>(records: &[T], key: &str) -> Vec<(String, String)> {
    let mut values: Vec<String> = records
        .iter()
        .map(|r| r.field(key).filter_key().into_owned())
        .filter(|v| !v.trim().is_empty())
        .collect();
    values.sort_by(|a, b| compare_text(a, b));
    values.dedup();
    values.into_iter().map(|v| (v.clone(), v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_equipment::{Equipment, EquipmentStatus};

    #[test]
    fn test_sort_indicator() {
        let asc = SortState::ascending("name");
        let desc = SortState::descending("name");
        assert_eq!(sort_indicator(Some(&asc), "name"), " ▲");
        assert_eq!(sort_indicator(Some(&desc), "name"), " ▼");
        assert_eq!(sort_indicator(Some(&asc), "status"), " ⇅");
        assert_eq!(sort_indicator(None, "name"), " ⇅");
    }

    #[test]
    fn test_number_formats() {
        assert_eq!(format_thousands(1234567), "1\u{00a0}234\u{00a0}567");
        assert_eq!(format_thousands(-1000), "-1\u{00a0}000");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_money(1234.5), "1\u{00a0}234,50\u{00a0}₽");
        assert_eq!(format_money(-0.5), "-0,50\u{00a0}₽");
        assert_eq!(format_percent(0.4567), "45,7%");
        assert_eq!(format_percent(0.0), "0,0%");
        assert_eq!(format_hours(12.5), "12,5\u{00a0}ч");
    }

    #[test]
    fn test_options_keep_enum_order() {
        let statuses = options(
            EquipmentStatus::all(),
            EquipmentStatus::code,
            EquipmentStatus::display_name,
        );
        assert_eq!(statuses.len(), EquipmentStatus::all().len());
        assert_eq!(statuses[0].0, EquipmentStatus::all()[0].code());
    }

    #[test]
    fn test_distinct_values_sorted_without_empty() {
        let records = vec![
            Equipment::new("Дрель", "Инструмент", "Склад Б", EquipmentStatus::Available),
            Equipment::new("Пила", "Инструмент", "Склад А", EquipmentStatus::InUse),
            Equipment::new("Ноутбук", "ИТ", "", EquipmentStatus::Available),
        ];
        let locations: Vec<String> = distinct_values(&records, "location")
            .into_iter()
            .map(|(code, _)| code)
            .collect();
        assert_eq!(locations, vec!["Склад А", "Склад Б"]);
        assert_eq!(distinct_values(&records, "category").len(), 2);
    }
}
