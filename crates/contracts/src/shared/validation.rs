//! Правила валидации полей и накопитель ошибок по полям

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Правила валидации поля
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Пустые правила (без ограничений)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Обязательное поле
    pub const fn required() -> Self {
        Self {
            required: true,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Числовой диапазон
    pub const fn range(min: f64, max: f64) -> Self {
        Self {
            required: false,
            min: Some(min),
            max: Some(max),
            min_length: None,
            max_length: None,
        }
    }

    /// Неотрицательное число
    pub const fn non_negative() -> Self {
        Self {
            required: false,
            min: Some(0.0),
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    pub const fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Проверить строковое значение
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!("{} не может быть пустым", field_label));
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!(
                    "{} должен содержать минимум {} символов",
                    field_label, min
                ));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!("{} не должен превышать {} символов", field_label, max));
            }
        }

        Ok(())
    }

    /// Проверить числовое значение
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} должен быть числом", field_label));
        }

        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} должен быть не менее {}", field_label, min));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} должен быть не более {}", field_label, max));
            }
        }

        Ok(())
    }
}

/// Ошибки валидации, сгруппированные по полям формы
///
/// Ключ - имя поля в JSON (camelCase), значение - сообщение для вывода рядом с полем.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить ошибку поля (первая ошибка поля сохраняется)
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Проверить строку по правилам и записать ошибку
    pub fn check_string(&mut self, field: &str, value: &str, rules: ValidationRules, label: &str) {
        if let Err(message) = rules.validate_string(value, label) {
            self.add(field, message);
        }
    }

    /// Проверить число по правилам и записать ошибку
    pub fn check_number(&mut self, field: &str, value: f64, rules: ValidationRules, label: &str) {
        if let Err(message) = rules.validate_number(value, label) {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())`, если ошибок нет
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.fields.values().map(String::as_str).collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_string() {
        let rules = ValidationRules::required();
        assert!(rules.validate_string("  ", "Название").is_err());
        assert!(rules.validate_string("Дрель", "Название").is_ok());
    }

    #[test]
    fn test_number_range() {
        let rules = ValidationRules::range(0.0, 24.0);
        assert!(rules.validate_number(-1.0, "Часы").is_err());
        assert!(rules.validate_number(25.0, "Часы").is_err());
        assert!(rules.validate_number(f64::NAN, "Часы").is_err());
        assert!(rules.validate_number(8.0, "Часы").is_ok());
    }

    #[test]
    fn test_errors_keep_first_message_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "first");
        errors.add("name", "second");
        errors.add("price", "bad price");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("first"));
        assert_eq!(errors.to_string(), "first; bad price");
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
