//! Форма записи: описание полей, сборка новой записи или патча из введенных
//! строк и заполнение формы по сохраненной записи

use contracts::shared::list::ListRecord;
use contracts::shared::validation::ValidationErrors;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

use super::date_utils::parse_date_input;

/// Ключ ошибки, не относящейся к конкретному полю
pub const FORM_ERROR_KEY: &str = "_form";

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    /// Дата в формате поля `<input type="date">`
    Date { required: bool },
    /// Выбор из вариантов (код, подпись)
    Select(fn() -> Vec<(String, String)>),
}

/// Поле формы; `key` совпадает с именем поля записи в JSON
#[derive(Debug, Clone, Copy)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind }
    }

    /// Начальное значение поля в форме
    pub fn initial_value(&self) -> String {
        match self.kind {
            FieldKind::Select(options) => options()
                .into_iter()
                .next()
                .map(|(code, _)| code)
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Введенные строки -> JSON-объект записи
///
/// Текст передается как есть (обязательность проверяет валидация записи),
/// пустые числа и необязательные даты пропускаются.
pub fn form_to_json(
    fields: &[FormField],
    values: &HashMap<String, String>,
) -> Result<Map<String, Value>, ValidationErrors> {
    let mut map = Map::new();
    let mut errors = ValidationErrors::new();

    for field in fields {
        let raw = values.get(field.key).map(String::as_str).unwrap_or("");
        match field.kind {
            FieldKind::Text | FieldKind::TextArea | FieldKind::Select(_) => {
                map.insert(field.key.to_string(), Value::String(raw.to_string()));
            }
            FieldKind::Number => {
                let raw = raw.trim().replace(',', ".");
                if raw.is_empty() {
                    continue;
                }
                // Целые числа отдельно: поля-количества в записях беззнаковые
                let number = match raw.parse::<i64>() {
                    Ok(n) => Some(Number::from(n)),
                    Err(_) => raw.parse::<f64>().ok().and_then(Number::from_f64),
                };
                match number {
                    Some(n) => {
                        map.insert(field.key.to_string(), Value::Number(n));
                    }
                    None => errors.add(field.key, format!("{}: введите число", field.label)),
                }
            }
            FieldKind::Date { required } => {
                if raw.trim().is_empty() {
                    if required {
                        errors.add(field.key, format!("{}: укажите дату", field.label));
                    }
                    continue;
                }
                match parse_date_input(raw) {
                    Some(date) => {
                        map.insert(
                            field.key.to_string(),
                            Value::String(date.format("%Y-%m-%d").to_string()),
                        );
                    }
                    None => errors.add(field.key, format!("{}: неверная дата", field.label)),
                }
            }
        }
    }

    errors.into_result().map(|_| map)
}

/// Собрать запись из формы
///
/// `prepare` может перестроить JSON перед разбором (например, вложенные строки).
pub fn build_record<T: DeserializeOwned>(
    fields: &[FormField],
    values: &HashMap<String, String>,
    prepare: Option<fn(&mut Map<String, Value>)>,
) -> Result<T, ValidationErrors> {
    let mut map = form_to_json(fields, values)?;
    if let Some(prepare) = prepare {
        prepare(&mut map);
    }
    serde_json::from_value(Value::Object(map)).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add(FORM_ERROR_KEY, format!("Неверные данные формы: {}", e));
        errors
    })
}

/// Собрать частичное обновление из формы правки
///
/// Пустые числа и необязательные даты в патч не попадают и остаются прежними.
pub fn build_patch<T: ListRecord>(
    fields: &[FormField],
    values: &HashMap<String, String>,
    prepare: Option<fn(&mut Map<String, Value>)>,
) -> Result<T::Patch, ValidationErrors> {
    build_record::<T::Patch>(fields, values, prepare)
}

/// Значения формы по записи (для правки)
///
/// `spread` раскладывает вложенные данные записи по полям формы.
pub fn record_to_form<T: Serialize>(
    fields: &[FormField],
    record: &T,
    spread: Option<fn(&mut Map<String, Value>)>,
) -> HashMap<String, String> {
    let mut map = match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    if let Some(spread) = spread {
        spread(&mut map);
    }
    fields
        .iter()
        .map(|field| {
            let value = match map.get(field.key) {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                _ => field.initial_value(),
            };
            (field.key.to_string(), value)
        })
        .collect()
}
