use serde::{Deserialize, Serialize};

use crate::shared::list::{Choice, FieldValue};

/// Статус заявки (отпуск, сверхурочные)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    #[serde(alias = "Pending", alias = "new")]
    Pending,
    #[serde(alias = "Approved")]
    Approved,
    #[serde(alias = "Rejected", alias = "declined")]
    Rejected,
}

impl RequestStatus {
    /// Получить код статуса
    pub fn code(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "На рассмотрении",
            RequestStatus::Approved => "Одобрено",
            RequestStatus::Rejected => "Отклонено",
        }
    }

    /// Получить все статусы
    pub fn all() -> Vec<RequestStatus> {
        vec![
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    /// Решение по заявке уже принято
    pub fn is_decided(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl Choice for RequestStatus {
    fn code(&self) -> &'static str {
        RequestStatus::code(self)
    }

    fn rank(&self) -> u8 {
        *self as u8
    }
}

impl From<RequestStatus> for FieldValue {
    fn from(value: RequestStatus) -> Self {
        FieldValue::choice(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for status in RequestStatus::all() {
            assert_eq!(RequestStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(RequestStatus::from_code("unknown"), None);
    }

    #[test]
    fn test_deserialize_aliases() {
        let status: RequestStatus = serde_json::from_str("\"Approved\"").unwrap();
        assert_eq!(status, RequestStatus::Approved);
        let status: RequestStatus = serde_json::from_str("\"declined\"").unwrap();
        assert_eq!(status, RequestStatus::Rejected);
    }
}
