use serde::{Deserialize, Serialize};

use super::{filter, paginate, search, sort, ListQuery, ListRecord};

/// Видимая часть списка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection<T> {
    pub items: Vec<T>,
    pub total_matching: usize,
    pub page_number: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

impl<T> Default for Projection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_matching: 0,
            page_number: 1,
            total_pages: 1,
            page_size: super::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Записи, прошедшие фильтры и поиск, в порядке сортировки
///
/// Без сортировки сохраняется порядок хранилища.
pub fn matching<T: ListRecord>(records: &[T], query: &ListQuery) -> Vec<T> {
    let mut items: Vec<T> = records
        .iter()
        .filter(|r| filter::matches(*r, &query.filter) && search::matches(*r, &query.search))
        .cloned()
        .collect();
    if let Some(sort_state) = &query.sort {
        sort::sort_list(&mut items, sort_state);
    }
    items
}

/// filter -> search -> sort -> paginate
pub fn project<T: ListRecord>(records: &[T], query: &ListQuery) -> Projection<T> {
    let page = paginate::paginate(matching(records, query), query.page);
    Projection {
        items: page.items,
        total_matching: page.total_count,
        page_number: page.page_number,
        total_pages: page.total_pages,
        page_size: query.page.page_size.max(1),
    }
}
