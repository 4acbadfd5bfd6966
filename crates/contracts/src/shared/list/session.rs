//! Модель представления страницы-списка
//!
//! Сессия владеет хранилищем записей и состоянием списка. Пересчет выполняется
//! по явным триггерам:
//! - изменение хранилища -> сводка и видимая часть;
//! - изменение фильтра, поиска, сортировки или страницы -> только видимая часть.

use super::{
    project, ListQuery, ListRecord, Projection, RecordStore, SortState, Summarize, SummaryContext,
};
use crate::domain::common::RecordId;
use crate::shared::error::ListError;
use crate::shared::validation::ValidationErrors;

/// Состояние асинхронной загрузки
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Закрываемое уведомление для пользователя
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ListSession<T: Summarize> {
    store: RecordStore<T>,
    query: ListQuery,
    context: SummaryContext,
    summary: T::Snapshot,
    summary_revision: u64,
    projection: Projection<T>,
    load_state: LoadState,
    notification: Option<Notification>,
    field_errors: ValidationErrors,
    generation: u64,
}

impl<T: Summarize> ListSession<T> {
    /// Создать сессию с начальными записями
    pub fn init(initial: Vec<T>, context: SummaryContext) -> Self {
        let mut session = Self {
            store: RecordStore::with_records(initial),
            query: ListQuery::default(),
            context,
            summary: T::Snapshot::default(),
            summary_revision: 0,
            projection: Projection::default(),
            load_state: LoadState::Idle,
            notification: None,
            field_errors: ValidationErrors::new(),
            generation: 0,
        };
        session.recompute_all();
        session
    }

    /// Завершить сессию, вернув записи
    pub fn teardown(self) -> Vec<T> {
        self.store.into_records()
    }

    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self.recompute_projection();
        self
    }

    // ========================================================================
    // Чтение
    // ========================================================================

    pub fn records(&self) -> &[T] {
        self.store.list()
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.store.get(id)
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn summary(&self) -> &T::Snapshot {
        &self.summary
    }

    /// Счетчик пересчетов сводки
    pub fn summary_revision(&self) -> u64 {
        self.summary_revision
    }

    pub fn projection(&self) -> &Projection<T> {
        &self.projection
    }

    pub fn context(&self) -> &SummaryContext {
        &self.context
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Pending)
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    pub fn set_context(&mut self, context: SummaryContext) {
        self.context = context;
        self.recompute_summary();
    }

    // ========================================================================
    // Состояние списка (только видимая часть)
    // ========================================================================

    pub fn set_filter(&mut self, key: &str, value: &str) {
        self.query.set_filter(key, value);
        self.recompute_projection();
    }

    pub fn clear_filters(&mut self) {
        self.query.clear_filters();
        self.recompute_projection();
    }

    pub fn set_search(&mut self, search: &str) {
        self.query.set_search(search);
        self.recompute_projection();
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.query.set_sort(sort);
        self.recompute_projection();
    }

    pub fn toggle_sort(&mut self, field: &str) {
        self.query.toggle_sort(field);
        self.recompute_projection();
    }

    pub fn set_page(&mut self, page_number: usize) {
        self.query.set_page(page_number);
        self.recompute_projection();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.query.set_page_size(page_size);
        self.recompute_projection();
    }

    // ========================================================================
    // Мутации (сводка и видимая часть)
    // ========================================================================

    /// Проверить и добавить запись
    pub fn create(&mut self, record: T) -> Result<T, ListError> {
        if let Err(errors) = record.validate() {
            self.field_errors = errors.clone();
            return Err(ListError::Validation(errors));
        }
        self.field_errors = ValidationErrors::new();
        let created = self.store.create(record)?;
        self.recompute_all();
        Ok(created)
    }

    /// Проверить результат патча и применить его
    pub fn update(&mut self, id: &RecordId, patch: T::Patch) -> Result<T, ListError> {
        let current = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| ListError::not_found(id))?;
        let mut candidate = current;
        super::RecordPatch::apply_to(patch.clone(), &mut candidate);
        if let Err(errors) = candidate.validate() {
            self.field_errors = errors.clone();
            return Err(ListError::Validation(errors));
        }
        self.field_errors = ValidationErrors::new();
        let updated = self.store.update(id, patch)?;
        self.recompute_all();
        Ok(updated)
    }

    pub fn remove(&mut self, id: &RecordId) -> Result<T, ListError> {
        let removed = self.store.remove(id)?;
        self.recompute_all();
        Ok(removed)
    }

    /// Принять сохраненную версию записи (позиция не меняется)
    pub fn commit(&mut self, record: T) -> Result<T, ListError> {
        let stored = self.store.replace(record)?;
        self.recompute_all();
        Ok(stored)
    }

    pub fn replace_all(&mut self, records: Vec<T>) {
        self.store.replace_all(records);
        self.recompute_all();
    }

    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.store.position(id)
    }

    // ========================================================================
    // Отмена несохраненной мутации
    //
    // Каждая отмена затрагивает только свою запись: изменения, сделанные
    // другими операциями за время запроса, остаются на месте.
    // ========================================================================

    /// Убрать добавленную запись
    pub fn undo_create(&mut self, id: &RecordId) {
        if self.store.remove(id).is_ok() {
            self.recompute_all();
        }
    }

    /// Вернуть прежнюю версию записи на ее место
    ///
    /// Если запись с тех пор удалена или изменена повторно, отмена пропускается.
    pub fn undo_update(&mut self, failed: &T, previous: T) {
        let unchanged = self
            .store
            .get(failed.id())
            .is_some_and(|current| current.meta().version == failed.meta().version);
        if unchanged && self.store.replace(previous).is_ok() {
            self.recompute_all();
        }
    }

    /// Вернуть удаленную запись на прежнюю позицию
    pub fn undo_remove(&mut self, index: usize, record: T) {
        if self.store.insert(index, record).is_ok() {
            self.recompute_all();
        }
    }

    // ========================================================================
    // Загрузка
    // ========================================================================

    /// Начать загрузку; возвращает номер запроса
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.load_state = LoadState::Pending;
        self.generation
    }

    /// Завершить загрузку
    ///
    /// Ответ устаревшего запроса игнорируется (`false`). При ошибке ранее
    /// загруженные записи остаются на месте.
    pub fn finish_load(&mut self, generation: u64, result: Result<Vec<T>, ListError>) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok(records) => {
                self.load_state = LoadState::Fulfilled;
                self.replace_all(records);
            }
            Err(err) => {
                self.load_state = LoadState::Rejected(err.to_string());
                self.notify_error(&err);
            }
        }
        true
    }

    // ========================================================================
    // Уведомления
    // ========================================================================

    /// Любая ошибка выводится уведомлением; ошибки валидации еще и у полей формы
    pub fn notify_error(&mut self, err: &ListError) {
        if let ListError::Validation(errors) = err {
            self.field_errors = errors.clone();
        }
        self.notification = Some(Notification {
            kind: NotificationKind::Error,
            message: err.to_string(),
        });
    }

    pub fn notify_success(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification {
            kind: NotificationKind::Success,
            message: message.into(),
        });
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn clear_field_errors(&mut self) {
        self.field_errors = ValidationErrors::new();
    }

    fn recompute_all(&mut self) {
        self.recompute_summary();
        self.recompute_projection();
    }

    fn recompute_summary(&mut self) {
        self.summary = T::summarize(self.store.list(), &self.context);
        self.summary_revision += 1;
    }

    fn recompute_projection(&mut self) {
        self.projection = project(self.store.list(), &self.query);
        // Номер страницы в запросе следует за приведенным к допустимому диапазону
        self.query.page.page_number = self.projection.page_number;
    }
}

impl<T: Summarize + ListRecord> Default for ListSession<T> {
    fn default() -> Self {
        Self::init(Vec::new(), SummaryContext::current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_leave_request::{self, LeaveRequest, LeaveRequestPatch, LeaveType};
    use crate::domain::common::{ymd, RecordRoot};
    use crate::enums::RequestStatus;

    fn session() -> ListSession<LeaveRequest> {
        ListSession::init(
            a003_leave_request::default_records(),
            SummaryContext::new(ymd(2024, 6, 1)),
        )
    }

    fn draft(employee: &str) -> LeaveRequest {
        LeaveRequest::new(employee, "ИТ", LeaveType::Annual, ymd(2024, 8, 1), ymd(2024, 8, 5))
    }

    #[test]
    fn test_query_changes_do_not_recompute_summary() {
        let mut session = session();
        let revision = session.summary_revision();
        let summary = session.summary().clone();

        session.set_filter("status", "approved");
        session.set_search("ИТ");
        session.toggle_sort("startDate");
        session.set_page(2);
        session.set_page_size(10);

        assert_eq!(session.summary_revision(), revision);
        assert_eq!(session.summary(), &summary);
    }

    #[test]
    fn test_summary_ignores_filters() {
        let mut session = session();
        let total = session.summary().total;
        session.set_filter("status", "rejected");
        assert!(session.projection().total_matching < total);
        assert_eq!(session.summary().total, total);
    }

    #[test]
    fn test_mutations_recompute_summary_and_projection() {
        let mut session = session();
        let before = session.summary().total;
        let revision = session.summary_revision();

        let created = session.create(draft("Новый сотрудник")).unwrap();
        assert_eq!(session.summary().total, before + 1);
        assert!(session.summary_revision() > revision);
        assert_eq!(session.projection().total_matching, before + 1);

        let updated = session
            .update(created.id(), LeaveRequestPatch::status(RequestStatus::Approved))
            .unwrap();
        assert_eq!(updated.id(), created.id());
        assert_eq!(
            session.get(created.id()).map(|r| r.status),
            Some(RequestStatus::Approved)
        );

        session.remove(created.id()).unwrap();
        assert!(session.get(created.id()).is_none());
        assert_eq!(session.summary().total, before);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut session = session().with_query(ListQuery::new().with_page_size(2));
        session.set_page(3);
        assert_eq!(session.projection().page_number, 3);
        session.set_filter("department", "ИТ");
        assert_eq!(session.projection().page_number, 1);
    }

    #[test]
    fn test_invalid_create_sets_field_errors() {
        let mut session = session();
        let count = session.records().len();

        let err = session.create(draft("")).unwrap_err();
        assert!(matches!(err, ListError::Validation(_)));
        assert!(session.field_errors().get("employee").is_some());
        assert_eq!(session.records().len(), count);

        session.create(draft("Исправлено")).unwrap();
        assert!(session.field_errors().is_empty());
    }

    #[test]
    fn test_invalid_patch_is_not_applied() {
        let mut session = session();
        let id = session.records()[0].id().clone();
        let before = session.get(&id).cloned();

        let patch = LeaveRequestPatch {
            end_date: Some(ymd(2000, 1, 1)),
            ..LeaveRequestPatch::default()
        };
        assert!(session.update(&id, patch).is_err());
        assert_eq!(session.get(&id).cloned(), before);
    }

    #[test]
    fn test_undo_create_removes_only_that_record() {
        let mut session = session();
        let summary = session.summary().clone();

        let kept = session.create(draft("Постоянный")).unwrap();
        let temporary = session.create(draft("Временный")).unwrap();
        session.undo_create(temporary.id());

        assert!(session.get(temporary.id()).is_none());
        assert!(session.get(kept.id()).is_some());
        assert_eq!(session.summary().total, summary.total + 1);
    }

    #[test]
    fn test_undo_update_restores_previous_in_place() {
        let mut session = session();
        let id = session.records()[1].id().clone();
        let previous = session.get(&id).cloned().unwrap();
        let other = session.records()[0].id().clone();

        let failed = session
            .update(&id, LeaveRequestPatch::status(RequestStatus::Rejected))
            .unwrap();
        session
            .update(&other, LeaveRequestPatch::status(RequestStatus::Approved))
            .unwrap();
        session.undo_update(&failed, previous.clone());

        assert_eq!(session.records()[1], previous);
        assert_eq!(
            session.get(&other).map(|r| r.status),
            Some(RequestStatus::Approved)
        );
    }

    #[test]
    fn test_undo_update_skips_newer_version() {
        let mut session = session();
        let id = session.records()[0].id().clone();
        let previous = session.get(&id).cloned().unwrap();

        let failed = session
            .update(&id, LeaveRequestPatch::status(RequestStatus::Rejected))
            .unwrap();
        let newer = session
            .update(&id, LeaveRequestPatch::status(RequestStatus::Approved))
            .unwrap();
        session.undo_update(&failed, previous);

        assert_eq!(session.get(&id), Some(&newer));
    }

    #[test]
    fn test_undo_remove_reinserts_at_index() {
        let mut session = session();
        let order: Vec<_> = session.records().iter().map(|r| r.id().clone()).collect();
        let id = order[2].clone();

        let index = session.position(&id).unwrap();
        let removed = session.remove(&id).unwrap();
        session.undo_remove(index, removed);

        let restored: Vec<_> = session.records().iter().map(|r| r.id().clone()).collect();
        assert_eq!(restored, order);
    }

    #[test]
    fn test_create_with_taken_id_is_duplicate() {
        let mut session = session();
        let count = session.records().len();
        let mut clash = draft("Двойник");
        clash.meta = session.records()[0].meta.clone();

        let err = session.create(clash).unwrap_err();
        assert!(matches!(err, ListError::Duplicate { .. }));
        assert_eq!(session.records().len(), count);
    }

    #[test]
    fn test_every_error_is_notified() {
        let mut session = session();
        session.notify_error(&ListError::not_found(&RecordId::new("gone")));
        assert_eq!(
            session.notification().map(|n| n.kind),
            Some(NotificationKind::Error)
        );

        session.dismiss_notification();
        let mut errors = ValidationErrors::new();
        errors.add("employee", "Поле обязательно");
        session.notify_error(&ListError::Validation(errors));
        assert!(session.field_errors().get("employee").is_some());
        assert!(session.notification().is_some());
    }

    #[test]
    fn test_superseded_load_is_ignored() {
        let mut session: ListSession<LeaveRequest> =
            ListSession::init(Vec::new(), SummaryContext::new(ymd(2024, 6, 1)));

        let first = session.begin_load();
        let second = session.begin_load();

        assert!(session.finish_load(second, Ok(vec![draft("Свежий")])));
        assert!(!session.finish_load(first, Ok(a003_leave_request::default_records())));

        assert_eq!(session.records().len(), 1);
        assert_eq!(session.load_state(), &LoadState::Fulfilled);
    }

    #[test]
    fn test_failed_reload_keeps_records() {
        let mut session = session();
        let count = session.records().len();

        let generation = session.begin_load();
        assert!(session.is_loading());
        session.finish_load(generation, Err(ListError::network(Some(500), "сбой")));

        assert_eq!(session.records().len(), count);
        assert!(matches!(session.load_state(), LoadState::Rejected(_)));
        let notification = session.notification().cloned().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);

        session.dismiss_notification();
        assert!(session.notification().is_none());
    }

    #[test]
    fn test_teardown_returns_records() {
        let session = session();
        let expected = session.records().to_vec();
        assert_eq!(session.teardown(), expected);
    }
}
