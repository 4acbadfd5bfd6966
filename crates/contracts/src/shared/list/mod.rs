//! Движок списков: хранилище, фильтр, поиск, сортировка, сводка, страницы
//!
//! Все операции работают с типизированными записями через [`ListRecord`].
//! Видимая часть строится цепочкой filter -> search -> sort -> paginate.

pub mod filter;
pub mod paginate;
pub mod projection;
pub mod query;
pub mod record;
pub mod search;
pub mod session;
pub mod sort;
pub mod store;
pub mod summary;
pub mod value;

pub use filter::{FilterState, ALL};
pub use paginate::{total_pages, Page, PageState, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use projection::{matching, project, Projection};
pub use query::ListQuery;
pub use record::{ListRecord, RecordPatch};
pub use session::{ListSession, LoadState, Notification, NotificationKind};
pub use sort::{SortDirection, SortState};
pub use store::RecordStore;
pub use summary::{rate, Summarize, SummaryContext};
pub use value::{Choice, FieldValue};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_leave_request::{LeaveRequest, LeaveType};
    use crate::domain::common::{ymd, RecordMeta, RecordRoot};
    use crate::enums::RequestStatus;

    /// 10 заявок, из них 3 одобрены
    fn ten_requests() -> Vec<LeaveRequest> {
        let rows = [
            ("Анна", "ИТ", (2024, 4, 1), RequestStatus::Pending),
            ("Борис", "Склад", (2024, 2, 1), RequestStatus::Rejected),
            ("Вера", "ИТ", (2024, 3, 5), RequestStatus::Approved),
            ("Глеб", "Продажи", (2024, 6, 1), RequestStatus::Pending),
            ("Дарья", "ИТ", (2024, 5, 1), RequestStatus::Pending),
            ("Егор", "Склад", (2024, 1, 10), RequestStatus::Approved),
            ("Жанна", "Продажи", (2024, 7, 1), RequestStatus::Rejected),
            ("Зоя", "ИТ", (2024, 8, 1), RequestStatus::Pending),
            ("Иван", "Склад", (2024, 2, 20), RequestStatus::Approved),
            ("Кира", "Продажи", (2024, 9, 1), RequestStatus::Pending),
        ];
        rows.iter()
            .enumerate()
            .map(|(i, (name, department, (y, m, d), status))| {
                let start = ymd(*y, *m, *d);
                let mut request =
                    LeaveRequest::new(*name, *department, LeaveType::Annual, start, start)
                        .with_status(*status);
                request.meta = RecordMeta::with_id(format!("r{:02}", i));
                request
            })
            .collect()
    }

    fn ids(records: &[LeaveRequest]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_all_filters_return_store_order() {
        let records = ten_requests();
        let mut query = ListQuery::new();
        for key in LeaveRequest::filter_keys() {
            query.set_filter(*key, ALL);
        }
        assert_eq!(ids(&matching(&records, &query)), ids(&records));
    }

    #[test]
    fn test_search_matches_lowercase_substring() {
        let records = ten_requests();
        for needle in ["ИТ", "ит", "склад", "ан", "zz", ""] {
            let found = matching(&records, &ListQuery::new().with_search(needle));
            let lowered = needle.to_lowercase();
            let expected: Vec<_> = records
                .iter()
                .filter(|r| {
                    LeaveRequest::search_fields().iter().any(|f| {
                        r.field(f).search_text().to_lowercase().contains(&lowered)
                    })
                })
                .cloned()
                .collect();
            assert_eq!(ids(&found), ids(&expected), "query {:?}", needle);
        }
    }

    #[test]
    fn test_sort_reversal_is_exact() {
        let records = ten_requests();
        for field in ["employee", "department", "startDate", "status", "days"] {
            let asc = matching(&records, &ListQuery::new().with_sort(SortState::ascending(field)));
            let desc =
                matching(&records, &ListQuery::new().with_sort(SortState::descending(field)));
            let mut reversed = ids(&desc);
            reversed.reverse();
            assert_eq!(ids(&asc), reversed, "field {}", field);

            for pair in asc.windows(2) {
                assert_ne!(
                    sort::compare(&pair[0], &pair[1], &SortState::ascending(field)),
                    std::cmp::Ordering::Greater
                );
            }
        }
    }

    #[test]
    fn test_approved_filter_sorted_by_date() {
        let records = ten_requests();
        let mut query = ListQuery::new();
        query.set_filter("status", "approved");
        query.set_sort(Some(SortState::ascending("startDate")));

        let projection = project(&records, &query);
        assert_eq!(projection.total_matching, 3);
        assert_eq!(ids(&projection.items), vec!["r05", "r08", "r02"]);
    }

    #[test]
    fn test_page_out_of_range_clamps_to_last() {
        let records = ten_requests();
        let mut query = ListQuery::new().with_page_size(4);
        query.set_page(5);

        let projection = project(&records, &query);
        assert_eq!(projection.total_pages, 3);
        assert_eq!(projection.page_number, 3);
        assert_eq!(ids(&projection.items), vec!["r08", "r09"]);
    }

    #[test]
    fn test_pages_cover_all_records() {
        let records = ten_requests();
        for size in 1..=12 {
            let mut seen = Vec::new();
            let first = project(&records, &ListQuery::new().with_page_size(size));
            assert!(first.total_pages * size >= records.len());
            for page in 1..=first.total_pages {
                let mut query = ListQuery::new().with_page_size(size);
                query.set_page(page);
                let projection = project(&records, &query);
                assert!(projection.items.len() <= size);
                seen.extend(ids(&projection.items));
            }
            assert_eq!(seen, ids(&records));
        }
    }
}
