//! Data models for CourtPass

mod filter;
mod gift;
mod user;

pub use filter::{
    category_options, CategoryFilterItem, FilterState, CATEGORY_FILTERS, DISPLAY_PRIORITY,
    FILTER_NAMES,
};
pub use gift::{GiftId, GiftItem};
pub use user::{Session, User};
