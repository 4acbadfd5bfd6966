use std::collections::HashSet;

use super::{ListRecord, RecordPatch};
use crate::domain::common::{RecordId, RecordMeta};
use crate::shared::error::ListError;

/// Упорядоченное хранилище записей одного типа в памяти
///
/// Порядок вставки сохраняется; обновление не меняет позицию записи.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore<T> {
    records: Vec<T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: ListRecord> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище с начальными записями; записям без идентификатора он назначается
    pub fn with_records(records: Vec<T>) -> Self {
        let mut store = Self::new();
        store.replace_all(records);
        store
    }

    /// Добавить запись в конец. Пустой идентификатор заменяется новым UUID.
    ///
    /// Занятый идентификатор дает `Duplicate`, хранилище не меняется.
    pub fn create(&mut self, mut record: T) -> Result<T, ListError> {
        ensure_id(&mut record);
        self.ensure_vacant(record.id())?;
        self.records.push(record.clone());
        Ok(record)
    }

    /// Вставить запись на позицию `index` (не дальше конца списка)
    pub fn insert(&mut self, index: usize, record: T) -> Result<T, ListError> {
        self.ensure_vacant(record.id())?;
        let index = index.min(self.records.len());
        self.records.insert(index, record.clone());
        Ok(record)
    }

    /// Применить частичное обновление к записи `id`
    ///
    /// Идентификатор и дата создания сохраняются, версия увеличивается.
    pub fn update(&mut self, id: &RecordId, patch: T::Patch) -> Result<T, ListError> {
        let record = self.find_mut(id)?;
        let preserved: RecordMeta = record.meta().clone();
        patch.apply_to(record);
        restore_identity(record, &preserved);
        record.meta_mut().touch();
        record.meta_mut().increment_version();
        Ok(record.clone())
    }

    /// Заменить запись с тем же идентификатором на месте
    pub fn replace(&mut self, record: T) -> Result<T, ListError> {
        let id = record.id().clone();
        let slot = self.find_mut(&id)?;
        *slot = record;
        Ok(slot.clone())
    }

    /// Удалить запись; повторное удаление дает `NotFound`
    pub fn remove(&mut self, id: &RecordId) -> Result<T, ListError> {
        let index = self.position(id).ok_or_else(|| ListError::not_found(id))?;
        Ok(self.records.remove(index))
    }

    /// Заменить все содержимое (загрузка списка)
    ///
    /// Из записей с одинаковым идентификатором остается первая.
    pub fn replace_all(&mut self, records: Vec<T>) {
        let mut seen = HashSet::new();
        self.records = records
            .into_iter()
            .filter_map(|mut r| {
                ensure_id(&mut r);
                seen.insert(r.id().clone()).then_some(r)
            })
            .collect();
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    /// Индекс записи в порядке вставки
    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn ensure_vacant(&self, id: &RecordId) -> Result<(), ListError> {
        match self.position(id) {
            Some(_) => Err(ListError::duplicate(id)),
            None => Ok(()),
        }
    }

    fn find_mut(&mut self, id: &RecordId) -> Result<&mut T, ListError> {
        self.records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ListError::not_found(id))
    }
}

fn ensure_id<T: ListRecord>(record: &mut T) {
    if record.id().is_empty() {
        record.meta_mut().id = RecordId::new_v4();
    }
}

fn restore_identity<T: ListRecord>(record: &mut T, preserved: &RecordMeta) {
    let meta = record.meta_mut();
    meta.id = preserved.id.clone();
    meta.created_at = preserved.created_at;
    meta.version = preserved.version;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a006_spare_part::{SparePart, SparePartPatch};
    use crate::domain::common::RecordRoot;

    fn part(code: &str) -> SparePart {
        SparePart::new(code, "Подшипник", "Подшипники", 10, 2, 150.0)
    }

    #[test]
    fn test_create_assigns_id() {
        let mut store = RecordStore::new();
        let created = store.create(part("BR-1")).unwrap();
        assert!(!created.id().is_empty());
        assert_eq!(store.get(created.id()), Some(&created));
    }

    #[test]
    fn test_duplicate_business_keys_allowed() {
        let mut store = RecordStore::new();
        let a = store.create(part("BR-1")).unwrap();
        let b = store.create(part("BR-1")).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_keeps_identity_and_position() {
        let mut store = RecordStore::new();
        let first = store.create(part("BR-1")).unwrap();
        let second = store.create(part("BR-2")).unwrap();

        let mut patch = SparePartPatch::quantity(3);
        patch.name = Some("Подшипник 6204".into());
        let updated = store.update(second.id(), patch).unwrap();

        assert_eq!(updated.id(), second.id());
        assert_eq!(updated.meta.created_at, second.meta.created_at);
        assert_eq!(updated.meta.version, second.meta.version + 1);
        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.name, "Подшипник 6204");

        let order: Vec<_> = store.list().iter().map(|p| p.id().clone()).collect();
        assert_eq!(order, vec![first.id().clone(), second.id().clone()]);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut store: RecordStore<SparePart> = RecordStore::new();
        let id = RecordId::new("missing");
        let err = store.update(&id, SparePartPatch::quantity(1)).unwrap_err();
        assert_eq!(err, ListError::not_found(&id));
    }

    #[test]
    fn test_remove_twice_is_not_found() {
        let mut store = RecordStore::new();
        let created = store.create(part("BR-1")).unwrap();
        store.create(part("BR-2")).unwrap();

        store.remove(created.id()).unwrap();
        assert_eq!(store.len(), 1);

        let err = store.remove(created.id()).unwrap_err();
        assert!(matches!(err, ListError::NotFound { .. }));
        assert_eq!(store.len(), 1);
        assert!(store.get(created.id()).is_none());
    }

    #[test]
    fn test_create_rejects_taken_id() {
        let mut store = RecordStore::new();
        let original = store.create(part("BR-1")).unwrap();

        let mut clash = part("BR-2");
        clash.meta = original.meta.clone();
        let err = store.create(clash).unwrap_err();

        assert_eq!(err, ListError::duplicate(original.id()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(original.id()), Some(&original));
    }

    #[test]
    fn test_replace_all_keeps_first_of_same_id() {
        let mut first = part("BR-1");
        first.meta = RecordMeta::with_id("sp-1");
        let mut second = part("BR-2");
        second.meta = RecordMeta::with_id("sp-1");
        let third = part("BR-3");

        let store = RecordStore::with_records(vec![first.clone(), second, third]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(first.id()), Some(&first));
        let ids: HashSet<_> = store.list().iter().map(|p| p.id().clone()).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn test_insert_restores_position() {
        let mut store = RecordStore::new();
        let a = store.create(part("BR-1")).unwrap();
        let b = store.create(part("BR-2")).unwrap();
        let c = store.create(part("BR-3")).unwrap();

        let index = store.position(b.id()).unwrap();
        let removed = store.remove(b.id()).unwrap();
        store.insert(index, removed).unwrap();
        let order: Vec<_> = store.list().iter().map(|p| p.id().clone()).collect();
        assert_eq!(order, vec![a.id().clone(), b.id().clone(), c.id().clone()]);

        assert!(matches!(store.insert(0, a.clone()), Err(ListError::Duplicate { .. })));
        store.remove(c.id()).unwrap();
        store.insert(99, c.clone()).unwrap();
        assert_eq!(store.list().last(), Some(&c));
    }
}
