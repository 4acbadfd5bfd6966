//! Даты в полях ввода

use chrono::NaiveDate;

/// Значение `<input type="date">` ("2024-03-15") -> дата; пустая строка -> None
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_input() {
        assert_eq!(parse_date_input("2024-03-15"), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(parse_date_input(" "), None);
        assert_eq!(parse_date_input("15.03.2024"), None);
    }
}
