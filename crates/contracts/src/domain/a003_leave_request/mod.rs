pub mod aggregate;
pub mod defaults;
pub mod summary;

pub use aggregate::{LeaveRequest, LeaveRequestPatch, LeaveType};
pub use defaults::default_records;
pub use summary::LeaveSummary;
