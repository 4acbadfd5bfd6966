use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use super::FieldValue;
use crate::domain::common::RecordRoot;
use crate::shared::validation::ValidationErrors;

/// Запись, которой управляет список: поиск, фильтр, сортировка, валидация
pub trait ListRecord:
    RecordRoot + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Частичное обновление записи
    type Patch: RecordPatch<Self> + Clone + Debug + Send + Sync + Serialize + DeserializeOwned;

    /// Значение поля по ключу (ключ совпадает с именем поля в JSON)
    ///
    /// Неизвестный ключ дает `FieldValue::Empty`.
    fn field(&self, key: &str) -> FieldValue;

    /// Поля, по которым работает строка поиска
    fn search_fields() -> &'static [&'static str];

    /// Ключи, по которым доступны фильтры
    fn filter_keys() -> &'static [&'static str];

    /// Проверка обязательных и допустимых значений полей
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Частичное обновление: применяются только заданные поля
///
/// Идентификатор и дата создания записи патчем не изменяются.
pub trait RecordPatch<T> {
    fn apply_to(self, record: &mut T);
}
