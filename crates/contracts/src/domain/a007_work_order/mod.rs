pub mod aggregate;
pub mod defaults;
pub mod summary;

pub use aggregate::{Priority, WorkOrder, WorkOrderPatch, WorkOrderStatus};
pub use defaults::default_records;
pub use summary::WorkOrderSummary;
