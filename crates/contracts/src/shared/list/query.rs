use serde::{Deserialize, Serialize};

use super::{FilterState, PageState, SortDirection, SortState};

/// Состояние списка: фильтры, строка поиска, сортировка, страница
///
/// Любое изменение фильтра, поиска или сортировки возвращает на первую страницу.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub filter: FilterState,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort: Option<SortState>,
    #[serde(default)]
    pub page: PageState,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page = PageState::first(page_size);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.filter.set(key, value);
        self.reset_page();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.reset_page();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.reset_page();
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
        self.reset_page();
    }

    /// Клик по заголовку: то же поле меняет направление, новое поле - по возрастанию
    pub fn toggle_sort(&mut self, field: &str) {
        let next = match &self.sort {
            Some(current) if current.field == field => {
                SortState::new(field, current.direction.reversed())
            }
            _ => SortState::new(field, SortDirection::Ascending),
        };
        self.set_sort(Some(next));
    }

    pub fn set_page(&mut self, page_number: usize) {
        self.page.page_number = page_number.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page = PageState::first(page_size.max(1));
    }

    fn reset_page(&mut self) {
        self.page.page_number = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_reset_page() {
        let mut query = ListQuery::new();
        query.set_page(4);
        query.set_filter("status", "approved");
        assert_eq!(query.page.page_number, 1);

        query.set_page(3);
        query.set_search("drill");
        assert_eq!(query.page.page_number, 1);

        query.set_page(2);
        query.toggle_sort("name");
        assert_eq!(query.page.page_number, 1);
    }

    #[test]
    fn test_toggle_sort() {
        let mut query = ListQuery::new();
        query.toggle_sort("name");
        assert_eq!(query.sort, Some(SortState::ascending("name")));
        query.toggle_sort("name");
        assert_eq!(query.sort, Some(SortState::descending("name")));
        query.toggle_sort("date");
        assert_eq!(query.sort, Some(SortState::ascending("date")));
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut query = ListQuery::new();
        query.set_page(5);
        query.set_page_size(50);
        assert_eq!(query.page, PageState::new(1, 50));
    }
}
