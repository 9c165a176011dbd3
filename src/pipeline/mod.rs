pub mod orchestrator;
pub mod pet_text;
pub mod session;
pub mod visibility;
