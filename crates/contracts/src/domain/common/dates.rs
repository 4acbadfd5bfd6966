use chrono::NaiveDate;

/// Дата из компонентов; недопустимая дата дает `NaiveDate::MIN`
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Число календарных дней периода, включая обе границы (0 для обратного периода)
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(0)
}

/// Формат даты для таблиц и документов
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_inclusive() {
        assert_eq!(days_inclusive(ymd(2024, 3, 1), ymd(2024, 3, 1)), 1);
        assert_eq!(days_inclusive(ymd(2024, 2, 28), ymd(2024, 3, 1)), 3);
        assert_eq!(days_inclusive(ymd(2024, 3, 5), ymd(2024, 3, 1)), 0);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(ymd(2024, 1, 9)), "09.01.2024");
        assert_eq!(format_optional_date(None), "");
    }
}
