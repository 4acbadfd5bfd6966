use super::ListRecord;

/// Запись содержит подстроку `query` (без учета регистра) хотя бы в одном поле поиска
///
/// Пустой запрос совпадает с любой записью.
pub fn matches<T: ListRecord>(record: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    T::search_fields().iter().any(|key| {
        record
            .field(key)
            .search_text()
            .to_lowercase()
            .contains(&needle)
    })
}
