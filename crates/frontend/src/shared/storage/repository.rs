use async_trait::async_trait;
use contracts::domain::common::RecordId;
use contracts::shared::error::ListError;
use contracts::shared::list::ListRecord;

/// Постоянное хранилище записей одной коллекции
///
/// Futures не `Send`: в браузере все выполняется в одном потоке.
#[async_trait(?Send)]
pub trait RecordRepository<T: ListRecord> {
    /// Все записи в порядке хранения
    async fn list(&self) -> Result<Vec<T>, ListError>;

    /// Сохранить новую запись; возвращает сохраненную версию
    async fn create(&self, record: &T) -> Result<T, ListError>;

    /// Заменить запись с тем же идентификатором
    async fn update(&self, record: &T) -> Result<T, ListError>;

    async fn remove(&self, id: &RecordId) -> Result<(), ListError>;
}
