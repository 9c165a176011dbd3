pub mod cache;
pub mod page;
pub mod scraper;
pub mod store;
