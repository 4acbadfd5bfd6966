use chrono::NaiveDate;
use feruca::Collator;
use std::borrow::Cow;
use std::cell::RefCell;
use std::cmp::Ordering;

/// Перечислимое значение поля (статус, приоритет, тип)
///
/// `code` используется фильтром и поиском, `rank` задает порядок сортировки.
pub trait Choice {
    fn code(&self) -> &'static str;
    fn rank(&self) -> u8;
}

/// Значение поля записи в единой форме для фильтрации, поиска и сортировки
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Empty,
    Text(String),
    Number(f64),
    Date(Option<NaiveDate>),
    Bool(bool),
    Choice { code: &'static str, rank: u8 },
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn choice<C: Choice + ?Sized>(value: &C) -> Self {
        FieldValue::Choice {
            code: value.code(),
            rank: value.rank(),
        }
    }

    /// Строка для сравнения со значением фильтра
    pub fn filter_key(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Empty => Cow::Borrowed(""),
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Number(n) => Cow::Owned(format_number(*n)),
            FieldValue::Date(Some(d)) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            FieldValue::Date(None) => Cow::Borrowed(""),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            FieldValue::Choice { code, .. } => Cow::Borrowed(code),
        }
    }

    /// Текст для полнотекстового поиска (отсутствующее значение - пустая строка)
    pub fn search_text(&self) -> Cow<'_, str> {
        self.filter_key()
    }

    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Empty => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Number(_) => 2,
            FieldValue::Date(_) => 3,
            FieldValue::Choice { .. } => 4,
            FieldValue::Text(_) => 5,
        }
    }

    /// Полный порядок значений одного поля
    ///
    /// Числа сравниваются численно, даты хронологически (пустая дата раньше любой),
    /// текст без учета регистра, перечисления по рангу.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => compare_text(a, b),
            (
                FieldValue::Choice { rank: ra, code: ca },
                FieldValue::Choice { rank: rb, code: cb },
            ) => ra.cmp(rb).then_with(|| ca.cmp(cb)),
            (FieldValue::Empty, FieldValue::Empty) => Ordering::Equal,
            // Пустое значение сортируется как самая ранняя дата
            (FieldValue::Empty, FieldValue::Date(_)) => Ordering::Less,
            (FieldValue::Date(_), FieldValue::Empty) => Ordering::Greater,
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(Some(value))
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(value: Option<NaiveDate>) -> Self {
        FieldValue::Date(value)
    }
}

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Сравнение строк по алфавиту (сопоставление Unicode, корневая локаль CLDR)
///
/// Регистр и "ё"/"е" учитываются только при совпадении букв; строки, равные
/// по правилам сопоставления, упорядочиваются по исходному написанию.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| collator.borrow_mut().collate(a, b))
        .then_with(|| a.cmp(b))
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_numerically() {
        let a = FieldValue::Number(9.0);
        let b = FieldValue::Number(10.0);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
    }

    #[test]
    fn test_missing_date_sorts_first() {
        let missing = FieldValue::Date(None);
        let date = FieldValue::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(missing.compare(&date), Ordering::Less);
        assert_eq!(FieldValue::Empty.compare(&date), Ordering::Less);
    }

    #[test]
    fn test_text_is_case_insensitive() {
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("Яблоко", "банан"), Ordering::Greater);
    }

    #[test]
    fn test_text_follows_alphabet() {
        assert_eq!(compare_text("ёлка", "яблоко"), Ordering::Less);
        assert_eq!(compare_text("ёж", "елка"), Ordering::Less);
        assert_eq!(compare_text("Ёлка", "ель"), Ordering::Less);

        let mut words = vec!["яблоко", "ёлка", "Елка", "елка", "арбуз"];
        words.sort_by(|a, b| compare_text(a, b));
        assert_eq!(words[0], "арбуз");
        assert_eq!(words[4], "яблоко");
        assert_eq!(compare_text("елка", "ёлка"), compare_text("ёлка", "елка").reverse());
        assert_ne!(compare_text("елка", "ёлка"), Ordering::Equal);
    }

    #[test]
    fn test_filter_key_formats() {
        assert_eq!(FieldValue::Number(3.0).filter_key(), "3");
        assert_eq!(FieldValue::Number(2.5).filter_key(), "2.5");
        assert_eq!(FieldValue::Bool(true).filter_key(), "true");
        assert_eq!(FieldValue::Date(None).filter_key(), "");
        assert_eq!(
            FieldValue::from(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()).filter_key(),
            "2024-03-05"
        );
    }
}
