pub mod extractor;
pub mod page;
pub mod pet_source;
pub mod store;
