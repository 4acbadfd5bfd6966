//! Источники записей для страниц: localStorage браузера или REST backend

pub mod key_value;
pub mod local;
pub mod repository;
pub mod rest;

pub use key_value::{BrowserStorage, KeyValueStore, MemoryStorage};
pub use local::LocalRepository;
pub use repository::RecordRepository;
pub use rest::RestRepository;
