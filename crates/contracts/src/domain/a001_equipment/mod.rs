pub mod aggregate;
pub mod defaults;
pub mod summary;

pub use aggregate::{Equipment, EquipmentPatch, EquipmentStatus};
pub use defaults::default_records;
pub use summary::EquipmentSummary;
