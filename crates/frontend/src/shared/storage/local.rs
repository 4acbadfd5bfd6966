use async_trait::async_trait;
use contracts::domain::common::{DefaultDataset, RecordId};
use contracts::shared::error::ListError;
use contracts::shared::list::ListRecord;
use std::marker::PhantomData;

use super::{BrowserStorage, KeyValueStore, RecordRepository};

/// Коллекция целиком хранится JSON-массивом под одним ключом
///
/// Если ключа нет, JSON не читается или хранилище недоступно, используется
/// встроенный начальный набор.
pub struct LocalRepository<T, S = BrowserStorage> {
    storage: S,
    _record: PhantomData<T>,
}

impl<T> LocalRepository<T, BrowserStorage> {
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }
}

impl<T, S> LocalRepository<T, S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            _record: PhantomData,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<T: ListRecord + DefaultDataset, S: KeyValueStore> LocalRepository<T, S> {
    /// Ключ вида `a006_spare_part_records`
    pub fn storage_key() -> String {
        format!("{}_{}_records", T::aggregate_index(), T::collection_name())
    }

    fn read(&self) -> Vec<T> {
        let key = Self::storage_key();
        let json = match self.storage.get(&key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("{}: no saved data, using defaults", key);
                return T::default_records();
            }
            Err(e) => {
                log::warn!("{}: {}, using defaults", key, e);
                return T::default_records();
            }
        };

        let items: Vec<serde_json::Value> = match serde_json::from_str(&json) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("{}: unreadable JSON ({}), using defaults", key, e);
                return T::default_records();
            }
        };

        // Запись без обязательных полей пропускается, остальные читаются
        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("{}: record #{} skipped: {}", key, index, e);
                    None
                }
            })
            .collect()
    }

    fn write(&self, records: &[T]) -> Result<(), ListError> {
        let json = serde_json::to_string(records)?;
        self.storage.set(&Self::storage_key(), &json)
    }

    fn position(records: &[T], id: &RecordId) -> Result<usize, ListError> {
        records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ListError::not_found(id))
    }
}

#[async_trait(?Send)]
impl<T: ListRecord + DefaultDataset, S: KeyValueStore> RecordRepository<T> for LocalRepository<T, S> {
    async fn list(&self) -> Result<Vec<T>, ListError> {
        Ok(self.read())
    }

    /// Пустой идентификатор заменяется новым UUID; занятый дает `Duplicate`
    async fn create(&self, record: &T) -> Result<T, ListError> {
        let mut record = record.clone();
        if record.id().is_empty() {
            record.meta_mut().id = RecordId::new_v4();
        }
        let mut records = self.read();
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(ListError::duplicate(record.id()));
        }
        records.push(record.clone());
        self.write(&records)?;
        Ok(record)
    }

    async fn update(&self, record: &T) -> Result<T, ListError> {
        let mut records = self.read();
        let index = Self::position(&records, record.id())?;
        records[index] = record.clone();
        self.write(&records)?;
        Ok(record.clone())
    }

    async fn remove(&self, id: &RecordId) -> Result<(), ListError> {
        let mut records = self.read();
        let index = Self::position(&records, id)?;
        records.remove(index);
        self.write(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use contracts::domain::a006_spare_part::{SparePart, StockStatus};
    use contracts::domain::common::RecordRoot;

    type Repo = LocalRepository<SparePart, MemoryStorage>;

    fn ids(records: &[SparePart]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(Repo::storage_key(), "a006_spare_part_records");
    }

    #[tokio::test]
    async fn test_missing_key_falls_back_to_defaults() {
        let repo = Repo::new(MemoryStorage::new());
        let records = repo.list().await.unwrap();
        assert_eq!(ids(&records), ids(&SparePart::default_records()));
    }

    #[tokio::test]
    async fn test_unreadable_json_falls_back_to_defaults() {
        let repo = Repo::new(MemoryStorage::with_value("a006_spare_part_records", "{not json"));
        let records = repo.list().await.unwrap();
        assert_eq!(records.len(), SparePart::default_records().len());
    }

    #[tokio::test]
    async fn test_mixed_key_spellings_are_normalized() {
        let json = r#"[
            {"id": 1, "stockCode": "BR-1", "name": "Подшипник", "quantity": 0, "minQuantity": 2},
            {"id": "2", "stock_code": "BR-2", "name": "Ремень", "quantity": 4, "min_stock": 5},
            {"id": "3", "name": "Без кода"}
        ]"#;
        let repo = Repo::new(MemoryStorage::with_value("a006_spare_part_records", json));
        let records = repo.list().await.unwrap();
        assert_eq!(ids(&records), vec!["1", "2"]);
        assert_eq!(records[0].stock_status(), StockStatus::OutOfStock);
        assert_eq!(records[1].min_quantity, 5);
        assert_eq!(records[1].stock_status(), StockStatus::Low);
    }

    #[tokio::test]
    async fn test_create_update_remove_persist() {
        let repo = Repo::new(MemoryStorage::with_value("a006_spare_part_records", "[]"));
        let mut part = SparePart::new("F-1", "Фильтр", "Фильтры", 3, 2, 150.0);
        part.meta.id = RecordId::new("p-1");

        repo.create(&part).await.unwrap();
        part.quantity = 9;
        repo.update(&part).await.unwrap();

        let stored = repo.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].quantity, 9);

        repo.remove(part.id()).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(
            repo.remove(part.id()).await,
            Err(ListError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let repo = Repo::new(MemoryStorage::with_value("a006_spare_part_records", "[]"));
        repo.storage().set_fail_writes(true);
        let part = SparePart::new("F-2", "Фильтр", "Фильтры", 1, 1, 10.0);
        assert!(matches!(
            repo.create(&part).await,
            Err(ListError::Persistence(_))
        ));
    }

    #[tokio::test]
    async fn test_create_with_existing_id_is_duplicate() {
        let repo = Repo::new(MemoryStorage::with_value("a006_spare_part_records", "[]"));
        let mut part = SparePart::new("F-1", "Фильтр", "Фильтры", 3, 2, 150.0);
        part.meta.id = RecordId::new("p-1");
        repo.create(&part).await.unwrap();

        let mut clash = SparePart::new("F-9", "Ремень", "Ремни", 1, 1, 80.0);
        clash.meta.id = RecordId::new("p-1");
        assert_eq!(
            repo.create(&clash).await,
            Err(ListError::duplicate(&RecordId::new("p-1")))
        );
        let stored = repo.list().await.unwrap();
        assert_eq!(ids(&stored), vec!["p-1"]);
        assert_eq!(stored[0].name, part.name);
    }

    #[tokio::test]
    async fn test_create_assigns_missing_id() {
        let repo = Repo::new(MemoryStorage::with_value("a006_spare_part_records", "[]"));
        let first = repo
            .create(&SparePart::new("F-1", "Фильтр", "Фильтры", 3, 2, 150.0))
            .await
            .unwrap();
        let second = repo
            .create(&SparePart::new("F-2", "Фильтр", "Фильтры", 3, 2, 150.0))
            .await
            .unwrap();
        assert!(!first.id().is_empty());
        assert_ne!(first.id(), second.id());
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }
}
