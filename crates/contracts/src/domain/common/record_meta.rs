use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

/// Метаданные экземпляра записи (lifecycle tracking)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    /// Уникальный идентификатор записи (пустой до сохранения)
    #[serde(default, alias = "_id", alias = "uuid")]
    pub id: RecordId,
    /// Дата создания записи
    #[serde(default = "Utc::now", alias = "created_at")]
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    #[serde(default = "Utc::now", alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
    /// Версия для optimistic locking
    #[serde(default)]
    pub version: i32,
}

impl RecordMeta {
    /// Создать новые метаданные для новой записи
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::default(),
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Метаданные с заданным идентификатором
    pub fn with_id(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            ..Self::new()
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Увеличить версию
    pub fn increment_version(&mut self) {
        self.version += 1;
    }
}

impl Default for RecordMeta {
    fn default() -> Self {
        Self::new()
    }
}
