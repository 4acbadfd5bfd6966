use thiserror::Error;

use super::validation::ValidationErrors;
use crate::domain::common::RecordId;

/// Ошибки операций над списком записей
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListError {
    /// Запись с указанным идентификатором отсутствует
    #[error("Запись не найдена: {id}")]
    NotFound { id: RecordId },

    /// Запись с таким идентификатором уже есть
    #[error("Запись уже существует: {id}")]
    Duplicate { id: RecordId },

    /// Обязательное поле не заполнено или заполнено неверно
    #[error("Ошибка валидации: {0}")]
    Validation(ValidationErrors),

    /// Сбой запроса к серверу
    #[error("Ошибка сети: {message}")]
    Network { status: Option<u16>, message: String },

    /// Сбой сериализации или локального хранилища
    #[error("Ошибка сохранения: {0}")]
    Persistence(String),
}

impl ListError {
    pub fn not_found(id: &RecordId) -> Self {
        ListError::NotFound { id: id.clone() }
    }

    pub fn duplicate(id: &RecordId) -> Self {
        ListError::Duplicate { id: id.clone() }
    }

    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        ListError::Network {
            status,
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        ListError::Persistence(message.into())
    }

    /// Ошибки полей, если это ошибка валидации
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ListError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ListError {
    fn from(errors: ValidationErrors) -> Self {
        ListError::Validation(errors)
    }
}

impl From<serde_json::Error> for ListError {
    fn from(e: serde_json::Error) -> Self {
        ListError::Persistence(format!("JSON: {}", e))
    }
}
