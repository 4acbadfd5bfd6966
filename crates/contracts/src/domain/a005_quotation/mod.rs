pub mod aggregate;
pub mod defaults;
pub mod document;
pub mod summary;

pub use aggregate::{Quotation, QuotationLine, QuotationPatch, QuotationStatus};
pub use defaults::default_records;
pub use document::quotation_document;
pub use summary::QuotationSummary;
