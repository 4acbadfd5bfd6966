use super::{RecordId, RecordMeta};

/// Трейт для корня записи
///
/// Определяет доступ к метаданным экземпляра и статические имена коллекции
pub trait RecordRoot {
    // ============================================================================
    // Методы экземпляра (данные конкретной записи)
    // ============================================================================

    /// Получить метаданные жизненного цикла
    fn meta(&self) -> &RecordMeta;

    /// Получить изменяемые метаданные
    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Получить ID записи
    fn id(&self) -> &RecordId {
        &self.meta().id
    }

    // ============================================================================
    // Метаданные класса записи (статические данные)
    // ============================================================================

    /// Индекс коллекции в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции для API и БД (например, "equipment")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число, например, "Оборудование")
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    // ============================================================================
    // Методы с реализацией по умолчанию
    // ============================================================================

    /// Полное имя коллекции (например, "a001_equipment")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Ключ локального хранилища для массива записей
    fn storage_key() -> String {
        format!("{}_records", Self::full_name())
    }
}
