use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Уникальный идентификатор записи
///
/// Хранится строкой. При чтении принимает как строку, так и число
/// (часть источников отдает числовые идентификаторы).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Идентификатор еще не назначен
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawId>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawId::Text(s)) => RecordId(s.trim().to_string()),
            Some(RawId::Signed(n)) => RecordId(n.to_string()),
            Some(RawId::Unsigned(n)) => RecordId(n.to_string()),
            None => RecordId::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_string_and_number() {
        let id: RecordId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");
        let id: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");
        let id: RecordId = serde_json::from_str("null").unwrap();
        assert!(id.is_empty());
    }

    #[test]
    fn test_serialize_as_string() {
        let id = RecordId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }

    #[test]
    fn test_new_v4_is_unique() {
        assert_ne!(RecordId::new_v4(), RecordId::new_v4());
        assert!(!RecordId::new_v4().is_empty());
    }
}
