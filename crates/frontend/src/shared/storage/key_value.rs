use contracts::shared::error::ListError;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Строковое хранилище ключ-значение
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ListError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ListError>;
}

/// window.localStorage
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, ListError> {
        web_sys::window()
            .ok_or_else(|| ListError::persistence("no window"))?
            .local_storage()
            .map_err(|e| ListError::persistence(format!("localStorage: {:?}", e)))?
            .ok_or_else(|| ListError::persistence("localStorage is not available"))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ListError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ListError::persistence(format!("localStorage read: {:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ListError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ListError::persistence(format!("localStorage write: {:?}", e)))
    }
}

/// Хранилище в памяти (тесты и режим без браузера)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Запись завершается ошибкой (переполнение квоты и т.п.)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ListError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ListError> {
        if self.fail_writes.get() {
            return Err(ListError::persistence("storage quota exceeded"));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
