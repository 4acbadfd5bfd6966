pub mod aggregate;
pub mod defaults;
pub mod summary;

pub use aggregate::{SparePart, SparePartPatch, StockStatus};
pub use defaults::default_records;
pub use summary::SparePartSummary;
