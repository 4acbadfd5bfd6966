use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ListRecord;

/// Значение фильтра "без ограничения"
pub const ALL: &str = "all";

/// Выбранные значения фильтров: ключ фильтра -> значение или `"all"`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Установить значение фильтра. `"all"` и пустая строка снимают ограничение.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if is_unconstrained(&value) {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Текущее значение фильтра (`"all"`, если ограничения нет)
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or(ALL)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Активные ограничения
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter(|(_, v)| !is_unconstrained(v))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

fn is_unconstrained(value: &str) -> bool {
    value.is_empty() || value == ALL
}

/// Запись проходит все активные фильтры (логическое И)
pub fn matches<T: ListRecord>(record: &T, filter: &FilterState) -> bool {
    filter
        .active()
        .all(|(key, expected)| record.field(key).filter_key() == expected)
}
