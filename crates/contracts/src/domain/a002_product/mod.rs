pub mod aggregate;
pub mod defaults;
pub mod summary;

pub use aggregate::{Product, ProductPatch, ProductStatus, StockLevel, LOW_STOCK_THRESHOLD};
pub use defaults::default_records;
pub use summary::ProductSummary;
