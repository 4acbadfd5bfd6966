pub mod error;
pub mod export;
pub mod list;
pub mod validation;
