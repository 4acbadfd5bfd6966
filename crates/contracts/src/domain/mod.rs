pub mod a001_equipment;
pub mod a002_product;
pub mod a003_leave_request;
pub mod a004_overtime;
pub mod a005_quotation;
pub mod a006_spare_part;
pub mod a007_work_order;
pub mod common;
