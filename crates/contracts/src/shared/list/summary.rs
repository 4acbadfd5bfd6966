use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Debug;

use super::ListRecord;
use crate::domain::common::RecordRoot;

/// Внешние параметры расчета сводки (текущая дата для просрочек)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryContext {
    pub today: NaiveDate,
}

impl SummaryContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Контекст на сегодняшнюю дату
    pub fn current() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

impl Default for SummaryContext {
    fn default() -> Self {
        Self::current()
    }
}

/// Сводная статистика по всем записям коллекции (без учета фильтров)
pub trait Summarize: ListRecord {
    type Snapshot: Clone
        + Debug
        + PartialEq
        + Default
        + Send
        + Sync
        + Serialize
        + DeserializeOwned;

    /// Чистая функция от полного набора записей; не зависит от порядка вставки
    fn summarize(records: &[Self], context: &SummaryContext) -> Self::Snapshot;
}

/// Доля `numerator / denominator`; при нулевом знаменателе ровно 0
pub fn rate(numerator: usize, denominator: usize) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

/// Записи в каноническом порядке (по идентификатору)
///
/// Суммы с плавающей точкой считаются в этом порядке, чтобы результат
/// не зависел от порядка вставки.
pub fn canonical_order<T: ListRecord>(records: &[T]) -> Vec<&T> {
    let mut ordered: Vec<&T> = records.iter().collect();
    ordered.sort_by(|a, b| RecordRoot::id(*a).cmp(RecordRoot::id(*b)));
    ordered
}

/// Количество записей по значению ключа
pub fn count_by<'a, T: 'a, I, F>(records: I, key: F) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> String,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

/// Сумма значения по ключу
pub fn sum_by<'a, T: 'a, I, K, V>(records: I, key: K, value: V) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a T>,
    K: Fn(&T) -> String,
    V: Fn(&T) -> f64,
{
    let mut sums = BTreeMap::new();
    for record in records {
        *sums.entry(key(record)).or_insert(0.0) += value(record);
    }
    sums
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_never_divides_by_zero() {
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(5, 0), 0.0);
        assert_eq!(rate(1, 4), 0.25);
    }

    #[test]
    fn test_count_by() {
        let words = ["a", "b", "a"];
        let counts = count_by(words.iter(), |w| w.to_string());
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&1));
    }
}
