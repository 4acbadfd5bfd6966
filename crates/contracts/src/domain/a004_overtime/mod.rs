pub mod aggregate;
pub mod defaults;
pub mod summary;

pub use aggregate::{OvertimeEntry, OvertimeEntryPatch, MAX_HOURS, OVERTIME_MULTIPLIER};
pub use defaults::default_records;
pub use summary::OvertimeSummary;
