use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::ListRecord;
use crate::domain::common::RecordRoot;

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Ascending)
    }

    /// Парсинг из строки запроса
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// Поле и направление сортировки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

/// Полный порядок записей: значение поля, затем идентификатор по возрастанию
///
/// Направление инвертирует все сравнение целиком, включая сравнение идентификаторов.
pub fn compare<T: ListRecord>(a: &T, b: &T, sort: &SortState) -> Ordering {
    let cmp = a
        .field(&sort.field)
        .compare(&b.field(&sort.field))
        .then_with(|| RecordRoot::id(a).cmp(RecordRoot::id(b)));
    if sort.direction.is_ascending() {
        cmp
    } else {
        cmp.reverse()
    }
}

/// Сортирует список по указанному полю
pub fn sort_list<T: ListRecord>(items: &mut [T], sort: &SortState) {
    items.sort_by(|a, b| compare(a, b, sort));
}
