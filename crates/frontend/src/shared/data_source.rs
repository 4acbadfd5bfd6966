//! Источник данных страниц: хранилище браузера или REST backend

use contracts::domain::common::DefaultDataset;
use contracts::shared::list::ListRecord;
use std::rc::Rc;

use super::storage::{BrowserStorage, KeyValueStore, LocalRepository, RecordRepository, RestRepository};

const STORAGE_KEY: &str = "data_source";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    #[default]
    Local,
    Remote,
}

impl DataSource {
    pub fn code(&self) -> &'static str {
        match self {
            DataSource::Local => "local",
            DataSource::Remote => "remote",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DataSource::Local => "Браузер",
            DataSource::Remote => "Сервер",
        }
    }

    pub fn all() -> Vec<DataSource> {
        vec![DataSource::Local, DataSource::Remote]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    /// Репозиторий коллекции для выбранного источника
    pub fn repository<T: ListRecord + DefaultDataset>(&self) -> Rc<dyn RecordRepository<T>> {
        match self {
            DataSource::Local => Rc::new(LocalRepository::<T>::browser()),
            DataSource::Remote => Rc::new(RestRepository::<T>::from_env()),
        }
    }

    /// Сохраненный выбор (по умолчанию хранилище браузера)
    pub fn restore<S: KeyValueStore>(storage: &S) -> Self {
        storage
            .get(STORAGE_KEY)
            .ok()
            .flatten()
            .and_then(|code| Self::from_code(&code))
            .unwrap_or_default()
    }

    pub fn save<S: KeyValueStore>(&self, storage: &S) {
        if let Err(e) = storage.set(STORAGE_KEY, self.code()) {
            log::warn!("data source not saved: {}", e);
        }
    }

    pub fn restore_from_browser() -> Self {
        Self::restore(&BrowserStorage)
    }
}
