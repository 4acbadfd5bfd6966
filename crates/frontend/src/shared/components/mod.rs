pub mod filter_select;
pub mod notification;
pub mod pagination_controls;
pub mod search_input;
pub mod stat_card;

pub use filter_select::FilterSelect;
pub use notification::NotificationBar;
pub use pagination_controls::PaginationControls;
pub use search_input::SearchInput;
pub use stat_card::{StatCard, StatTone};
