//! Операции страницы над сессией списка с сохранением в репозиторий
//!
//! Мутация сначала применяется к сессии, затем сохраняется. Если сохранение
//! не удалось, отменяется только эта мутация, и сессия показывает ошибку.
//! Операции, завершившиеся за время запроса, не затрагиваются.

use contracts::domain::common::RecordId;
use contracts::shared::error::ListError;
use contracts::shared::list::{ListSession, Summarize};
use leptos::prelude::*;
use std::cell::RefCell;

use super::storage::RecordRepository;

/// Контейнер сессии: реактивный сигнал на странице, `RefCell` в тестах
pub trait SessionCell<T: Summarize> {
    /// `None`, если контейнер уже уничтожен (страница закрыта)
    fn read<R>(&self, f: impl FnOnce(&ListSession<T>) -> R) -> Option<R>;
    fn write<R>(&self, f: impl FnOnce(&mut ListSession<T>) -> R) -> Option<R>;
}

impl<T: Summarize> SessionCell<T> for RwSignal<ListSession<T>> {
    fn read<R>(&self, f: impl FnOnce(&ListSession<T>) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut ListSession<T>) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl<T: Summarize> SessionCell<T> for RefCell<ListSession<T>> {
    fn read<R>(&self, f: impl FnOnce(&ListSession<T>) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn write<R>(&self, f: impl FnOnce(&mut ListSession<T>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

fn closed() -> ListError {
    ListError::persistence("page session is closed")
}

/// Отказ до обращения к репозиторию: показать и вернуть ошибку
fn rejected<T: Summarize, C: SessionCell<T>>(cell: &C, e: ListError) -> ListError {
    log::debug!("{}: rejected: {}", T::collection_name(), e);
    cell.write(|s| s.notify_error(&e));
    e
}

/// Загрузить записи из репозитория
///
/// Ответ, пришедший после более нового запроса, отбрасывается.
/// При ошибке прежние записи остаются.
pub async fn load<T, C, R>(cell: &C, repository: &R) -> Result<(), ListError>
where
    T: Summarize,
    C: SessionCell<T>,
    R: RecordRepository<T> + ?Sized,
{
    let generation = cell.write(|s| s.begin_load()).ok_or_else(closed)?;
    let result = repository.list().await;
    let error = result.as_ref().err().cloned();

    let applied = cell
        .write(|s| s.finish_load(generation, result))
        .unwrap_or(false);
    if !applied {
        log::debug!("{}: superseded load #{} ignored", T::collection_name(), generation);
        return Ok(());
    }
    match error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Создать запись: проверка, добавление в сессию, сохранение
pub async fn create_record<T, C, R>(cell: &C, repository: &R, record: T) -> Result<T, ListError>
where
    T: Summarize,
    C: SessionCell<T>,
    R: RecordRepository<T> + ?Sized,
{
    let created = cell
        .write(|s| s.create(record))
        .ok_or_else(closed)?
        .map_err(|e| rejected::<T, C>(cell, e))?;

    match repository.create(&created).await {
        Ok(saved) => {
            cell.write(|s| {
                if let Err(e) = s.commit(saved.clone()) {
                    s.notify_error(&e);
                } else {
                    s.notify_success(format!("{}: запись добавлена", T::element_name()));
                }
            });
            Ok(saved)
        }
        Err(e) => {
            log::warn!("{}: create failed: {}", T::collection_name(), e);
            cell.write(|s| {
                s.undo_create(created.id());
                s.notify_error(&e);
            });
            Err(e)
        }
    }
}

/// Частичное обновление записи с сохранением
pub async fn update_record<T, C, R>(
    cell: &C,
    repository: &R,
    id: &RecordId,
    patch: T::Patch,
) -> Result<T, ListError>
where
    T: Summarize,
    C: SessionCell<T>,
    R: RecordRepository<T> + ?Sized,
{
    let (previous, updated) = cell
        .write(|s| {
            let previous = s.get(id).cloned();
            s.update(id, patch).map(|updated| (previous, updated))
        })
        .ok_or_else(closed)?
        .map_err(|e| rejected::<T, C>(cell, e))?;

    match repository.update(&updated).await {
        Ok(saved) => {
            cell.write(|s| {
                if let Err(e) = s.commit(saved.clone()) {
                    s.notify_error(&e);
                } else {
                    s.notify_success(format!("{}: изменения сохранены", T::element_name()));
                }
            });
            Ok(saved)
        }
        Err(e) => {
            log::warn!("{}: update of {} failed: {}", T::collection_name(), id, e);
            cell.write(|s| {
                if let Some(previous) = previous {
                    s.undo_update(&updated, previous);
                }
                s.notify_error(&e);
            });
            Err(e)
        }
    }
}

/// Удалить запись; при ошибке сохранения запись возвращается на место
pub async fn remove_record<T, C, R>(cell: &C, repository: &R, id: &RecordId) -> Result<(), ListError>
where
    T: Summarize,
    C: SessionCell<T>,
    R: RecordRepository<T> + ?Sized,
{
    let (index, removed) = cell
        .write(|s| {
            let index = s.position(id).unwrap_or_default();
            s.remove(id).map(|removed| (index, removed))
        })
        .ok_or_else(closed)?
        .map_err(|e| rejected::<T, C>(cell, e))?;

    match repository.remove(id).await {
        Ok(()) => {
            cell.write(|s| s.notify_success(format!("{}: запись удалена", T::element_name())));
            Ok(())
        }
        Err(e) => {
            log::warn!("{}: remove of {} failed: {}", T::collection_name(), id, e);
            cell.write(|s| {
                s.undo_remove(index, removed);
                s.notify_error(&e);
            });
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::{LocalRepository, MemoryStorage};
    use async_trait::async_trait;
    use contracts::domain::a003_leave_request::{LeaveRequest, LeaveRequestPatch, LeaveType};
    use contracts::domain::common::{ymd, RecordMeta, RecordRoot};
    use contracts::enums::RequestStatus;
    use contracts::shared::list::{LoadState, NotificationKind, SummaryContext};

    fn request(id: &str, employee: &str) -> LeaveRequest {
        let mut r = LeaveRequest::new(
            employee,
            "ИТ",
            LeaveType::Annual,
            ymd(2024, 5, 6),
            ymd(2024, 5, 8),
        );
        r.meta = RecordMeta::with_id(id);
        r
    }

    fn session(records: Vec<LeaveRequest>) -> RefCell<ListSession<LeaveRequest>> {
        RefCell::new(ListSession::init(
            records,
            SummaryContext::new(ymd(2024, 6, 1)),
        ))
    }

    fn local() -> LocalRepository<LeaveRequest, MemoryStorage> {
        LocalRepository::new(MemoryStorage::with_value("a003_leave_request_records", "[]"))
    }

    /// Репозиторий, который всегда отвечает ошибкой сети
    struct Offline;

    /// Как `Offline`, но отвечает не сразу: другие операции успевают завершиться
    struct SlowOffline;

    #[async_trait(?Send)]
    impl RecordRepository<LeaveRequest> for SlowOffline {
        async fn list(&self) -> Result<Vec<LeaveRequest>, ListError> {
            tokio::task::yield_now().await;
            Offline.list().await
        }
        async fn create(&self, record: &LeaveRequest) -> Result<LeaveRequest, ListError> {
            tokio::task::yield_now().await;
            Offline.create(record).await
        }
        async fn update(&self, record: &LeaveRequest) -> Result<LeaveRequest, ListError> {
            tokio::task::yield_now().await;
            Offline.update(record).await
        }
        async fn remove(&self, id: &RecordId) -> Result<(), ListError> {
            tokio::task::yield_now().await;
            Offline.remove(id).await
        }
    }

    async fn stored(records: &[LeaveRequest]) -> LocalRepository<LeaveRequest, MemoryStorage> {
        let repo = local();
        for record in records {
            repo.create(record).await.unwrap();
        }
        repo
    }

    fn ids(cell: &RefCell<ListSession<LeaveRequest>>) -> Vec<String> {
        cell.borrow().records().iter().map(|r| r.id().to_string()).collect()
    }

    #[async_trait(?Send)]
    impl RecordRepository<LeaveRequest> for Offline {
        async fn list(&self) -> Result<Vec<LeaveRequest>, ListError> {
            Err(ListError::network(Some(503), "backend unavailable"))
        }
        async fn create(&self, _: &LeaveRequest) -> Result<LeaveRequest, ListError> {
            Err(ListError::network(Some(503), "backend unavailable"))
        }
        async fn update(&self, _: &LeaveRequest) -> Result<LeaveRequest, ListError> {
            Err(ListError::network(Some(503), "backend unavailable"))
        }
        async fn remove(&self, _: &RecordId) -> Result<(), ListError> {
            Err(ListError::network(Some(503), "backend unavailable"))
        }
    }

    #[tokio::test]
    async fn test_create_update_remove_roundtrip() {
        let cell = session(Vec::new());
        let repo = local();

        let created = create_record(&cell, &repo, request("", "Анна")).await.unwrap();
        assert!(!created.id().is_empty());

        let id = created.id().clone();
        update_record(&cell, &repo, &id, LeaveRequestPatch::status(RequestStatus::Approved))
            .await
            .unwrap();
        let stored = repo.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id(), &id);
        assert_eq!(stored[0].status, RequestStatus::Approved);
        assert_eq!(cell.borrow().summary().approved, 1);

        remove_record(&cell, &repo, &id).await.unwrap();
        assert!(cell.borrow().records().is_empty());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_rolls_back() {
        let cell = session(vec![request("a", "Анна")]);
        let revision = cell.borrow().summary_revision();

        let result = create_record(&cell, &Offline, request("b", "Борис")).await;
        assert!(matches!(result, Err(ListError::Network { .. })));

        let s = cell.borrow();
        assert_eq!(s.records().len(), 1);
        assert_eq!(s.summary().total, 1);
        assert!(s.summary_revision() > revision);
        assert_eq!(s.notification().map(|n| n.kind), Some(NotificationKind::Error));
    }

    #[tokio::test]
    async fn test_failed_remove_restores_record() {
        let cell = session(vec![request("a", "Анна"), request("b", "Борис")]);
        let id = RecordId::new("a");
        assert!(remove_record(&cell, &Offline, &id).await.is_err());

        let s = cell.borrow();
        let ids: Vec<&str> = s.records().iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_invalid_record_never_reaches_repository() {
        let cell = session(Vec::new());
        let repo = local();
        let result = create_record(&cell, &repo, request("x", "")).await;
        assert!(matches!(result, Err(ListError::Validation(_))));
        assert!(cell.borrow().field_errors().get("employee").is_some());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_records() {
        let cell = session(vec![request("a", "Анна")]);
        assert!(load(&cell, &Offline).await.is_err());

        let s = cell.borrow();
        assert_eq!(s.records().len(), 1);
        assert!(matches!(s.load_state(), LoadState::Rejected(_)));
    }

    #[tokio::test]
    async fn test_load_replaces_records() {
        let cell = session(Vec::new());
        let repo = local();
        repo.create(&request("z", "Зоя")).await.unwrap();

        load(&cell, &repo).await.unwrap();
        let s = cell.borrow();
        assert_eq!(s.load_state(), &LoadState::Fulfilled);
        assert_eq!(s.records().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_concurrent_remove() {
        let records = vec![request("a", "Анна"), request("b", "Борис")];
        let cell = session(records.clone());
        let repo = stored(&records).await;
        let a = RecordId::new("a");
        let b = RecordId::new("b");

        let (updated, removed) = tokio::join!(
            update_record(&cell, &SlowOffline, &a, LeaveRequestPatch::status(RequestStatus::Approved)),
            remove_record(&cell, &repo, &b),
        );
        assert!(updated.is_err());
        assert!(removed.is_ok());

        assert_eq!(ids(&cell), vec!["a"]);
        assert_eq!(cell.borrow().get(&a).map(|r| r.status), Some(RequestStatus::Pending));
        let saved: Vec<_> = repo.list().await.unwrap().iter().map(|r| r.id().to_string()).collect();
        assert_eq!(saved, vec!["a"]);
    }

    #[tokio::test]
    async fn test_failed_create_keeps_concurrent_create() {
        let cell = session(vec![request("a", "Анна")]);
        let repo = local();

        let (failed, saved) = tokio::join!(
            create_record(&cell, &SlowOffline, request("b", "Борис")),
            create_record(&cell, &repo, request("c", "Вера")),
        );
        assert!(failed.is_err());
        assert!(saved.is_ok());
        assert_eq!(ids(&cell), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_failed_remove_restores_position_after_concurrent_create() {
        let records = vec![request("a", "Анна"), request("b", "Борис"), request("c", "Вера")];
        let cell = session(records.clone());
        let repo = stored(&records).await;
        let removed_id = RecordId::new("b");

        let (failed, saved) = tokio::join!(
            remove_record(&cell, &SlowOffline, &removed_id),
            create_record(&cell, &repo, request("d", "Глеб")),
        );
        assert!(failed.is_err());
        assert!(saved.is_ok());
        assert_eq!(ids(&cell), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_missing_record_is_notified() {
        let cell = session(vec![request("a", "Анна")]);
        let repo = local();
        let gone = RecordId::new("gone");

        let result = remove_record(&cell, &repo, &gone).await;
        assert_eq!(result, Err(ListError::not_found(&gone)));
        assert_eq!(
            cell.borrow().notification().map(|n| n.kind),
            Some(NotificationKind::Error)
        );

        cell.borrow_mut().dismiss_notification();
        let result =
            update_record(&cell, &repo, &gone, LeaveRequestPatch::status(RequestStatus::Approved))
                .await;
        assert!(matches!(result, Err(ListError::NotFound { .. })));
        assert!(cell.borrow().notification().is_some());
        assert_eq!(ids(&cell), vec!["a"]);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let first = request("a", "Анна");
        let repo = stored(&[first.clone()]).await;
        let cell = session(Vec::new());

        let result = create_record(&cell, &repo, request("a", "Двойник")).await;
        assert!(matches!(result, Err(ListError::Duplicate { .. })));
        assert!(cell.borrow().records().is_empty());
        let saved = repo.list().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].employee, first.employee);

        let cell = session(vec![request("a", "Анна")]);
        let result = create_record(&cell, &local(), request("a", "Двойник")).await;
        assert!(matches!(result, Err(ListError::Duplicate { .. })));
        assert_eq!(cell.borrow().records().len(), 1);
        assert!(cell.borrow().notification().is_some());
    }
}
