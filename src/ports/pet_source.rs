use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait PetTextSource: Send + Sync {
    /// Fetch the pet policy fragment from a listing's detail page.
    async fn scrape_pet_text(&self, url: &str) -> Result<String>;
}
