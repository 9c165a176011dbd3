use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::adapters::scraper::pet_parser::ItempropExtractor;
use crate::adapters::scraper::throttle::Throttle;
use crate::config::types::ScraperConfig;
use crate::error::{OrpetsError, Result};
use crate::ports::extractor::FragmentExtractor;
use crate::ports::pet_source::PetTextSource;

/// Fetches listing detail pages and pulls the pet policy fragment out.
///
/// One throttled GET per call, no retries: a failure is reported to the
/// caller and the next encounter of the URL starts over.
pub struct PetScraper {
    http: Client,
    throttle: Throttle,
    extractor: Arc<dyn FragmentExtractor>,
}

impl PetScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let extractor = Arc::new(ItempropExtractor::new(&config.fragment_selector)?);
        Self::with_extractor(config, extractor)
    }

    pub fn with_extractor(
        config: &ScraperConfig,
        extractor: Arc<dyn FragmentExtractor>,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            throttle: Throttle::new(config.min_delay_ms, config.max_delay_ms),
            extractor,
        })
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        self.throttle.wait().await;

        debug!(url, "Fetching detail page");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OrpetsError::Network {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl PetTextSource for PetScraper {
    async fn scrape_pet_text(&self, url: &str) -> Result<String> {
        let html = self.fetch_html(url).await?;
        self.extractor.extract(&html)
    }
}
