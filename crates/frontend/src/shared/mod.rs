pub mod api_utils;
pub mod components;
pub mod data_source;
pub mod date_utils;
pub mod export;
pub mod form;
pub mod icons;
pub mod list_page;
pub mod list_utils;
pub mod session;
pub mod storage;
