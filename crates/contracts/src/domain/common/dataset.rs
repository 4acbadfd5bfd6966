/// Встроенный начальный набор записей коллекции
///
/// Используется для заполнения пустой БД и как запасной вариант,
/// когда локальное хранилище недоступно или повреждено.
pub trait DefaultDataset: Sized {
    fn default_records() -> Vec<Self>;
}
