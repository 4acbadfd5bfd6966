//! Выгрузка списков и документов в файлы: CSV, PDF, DOCX

pub mod docx;
pub mod download;
pub mod pdf;

pub use docx::render_docx;
pub use download::{download_bytes, download_text, CSV_MIME, DOCX_MIME, PDF_MIME};
pub use pdf::render_pdf;
