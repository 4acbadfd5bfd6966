pub mod collection;
pub mod service;
