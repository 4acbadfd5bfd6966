//! Экспорт записей: CSV и нейтральная модель документа для PDF/Word

pub mod csv;
pub mod document;

pub use self::csv::{to_csv, write_table};
pub use document::{Block, DocumentModel, DocumentTemplate, TableBlock, ThemeColor};

/// Тип, который можно выгрузить таблицей
pub trait Exportable {
    /// Заголовки колонок
    fn headers() -> Vec<&'static str>;

    /// Значения колонок для одной записи
    fn to_csv_row(&self) -> Vec<String>;
}
