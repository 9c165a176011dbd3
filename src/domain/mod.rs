pub mod cache_entry;
pub mod listing;
pub mod processed;
