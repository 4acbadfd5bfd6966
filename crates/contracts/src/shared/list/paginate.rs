use serde::{Deserialize, Serialize};

/// Размер страницы по умолчанию
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Доступные размеры страницы
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Номер страницы (с 1) и размер страницы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub page_number: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Одна страница результата
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

/// Количество страниц: не меньше одной
pub fn total_pages(count: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    count.div_ceil(size).max(1)
}

/// Нарезает последовательность на страницы
///
/// Номер страницы за пределами `[1, total_pages]` приводится к ближайшей границе,
/// поэтому при наличии записей страница никогда не бывает пустой.
pub fn paginate<T>(items: Vec<T>, page: PageState) -> Page<T> {
    let size = page.page_size.max(1);
    let total_count = items.len();
    let total_pages = total_pages(total_count, size);
    let page_number = page.page_number.clamp(1, total_pages);
    let start = (page_number - 1) * size;
    let items = items.into_iter().skip(start).take(size).collect();

    Page {
        items,
        page_number,
        total_pages,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 4), 1);
        assert_eq!(total_pages(4, 4), 1);
        assert_eq!(total_pages(10, 4), 3);
        assert_eq!(total_pages(10, 0), 10);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let items: Vec<u32> = (1..=10).collect();
        let page = paginate(items, PageState::new(5, 4));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page_number, 3);
        assert_eq!(page.items, vec![9, 10]);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let items: Vec<u32> = (1..=10).collect();
        let page = paginate(items, PageState::new(0, 4));
        assert_eq!(page.page_number, 1);
        assert_eq!(page.items, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_page_bounds_hold_for_many_sizes() {
        for count in 0..30usize {
            for size in 1..8usize {
                for number in 0..10usize {
                    let items: Vec<usize> = (0..count).collect();
                    let page = paginate(items, PageState::new(number, size));
                    assert!(page.items.len() <= size);
                    assert!(page.total_pages * size >= count);
                    if count > 0 {
                        assert!(!page.items.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_sequence() {
        let page = paginate(Vec::<u8>::new(), PageState::new(3, 10));
        assert_eq!(page.page_number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }
}
