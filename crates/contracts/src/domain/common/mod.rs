//! Общие типы и трейты всех записей

pub mod dataset;
pub mod dates;
pub mod record_id;
pub mod record_meta;
pub mod record_root;

pub use dataset::DefaultDataset;
pub use dates::{days_inclusive, format_date, format_optional_date, ymd};
pub use record_id::RecordId;
pub use record_meta::RecordMeta;
pub use record_root::RecordRoot;
