pub mod client;
pub mod pet_parser;
pub mod throttle;
