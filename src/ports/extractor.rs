use crate::error::Result;

/// Pulls the pet policy fragment out of a detail page.
///
/// The detail page markup is an external, unversioned contract; everything
/// that knows its shape lives behind this trait.
pub trait FragmentExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Result<String>;
}
