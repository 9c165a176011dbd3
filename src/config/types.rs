use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{OrpetsError, Result};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub page: PageLayout,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScraperConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Lower bound of the politeness delay before each detail fetch.
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Upper bound (exclusive) of the politeness delay.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// CSS selector of the element whose inner markup is the pet policy.
    #[serde(default = "default_fragment_selector")]
    pub fragment_selector: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            fragment_selector: default_fragment_selector(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

impl CacheConfig {
    /// Lifetime of a cached pet-text entry.
    pub fn ttl(&self) -> Result<Duration> {
        self.ttl_hours
            .checked_mul(60 * 60)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                OrpetsError::Config(format!("cache.ttl_hours ({}) is too large", self.ttl_hours))
            })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            store_path: default_store_path(),
        }
    }
}

/// What the scroll worker does when one listing of a batch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the batch; listings not yet reached are released for later scans.
    #[default]
    Abort,
    /// Log the failure and carry on with the rest of the batch.
    Skip,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScrollConfig {
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Release a failed listing so a later scroll event fetches it again.
    #[serde(default)]
    pub retry_failed: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageLayout {
    #[serde(default = "default_listing_selector")]
    pub listing_selector: String,
    #[serde(default = "default_link_selector")]
    pub link_selector: String,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default = "default_card_height")]
    pub card_height: f64,
    #[serde(default)]
    pub header_offset: f64,
    #[serde(default = "default_scroll_step")]
    pub scroll_step: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            listing_selector: default_listing_selector(),
            link_selector: default_link_selector(),
            viewport_height: default_viewport_height(),
            card_height: default_card_height(),
            header_offset: 0.0,
            scroll_step: default_scroll_step(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".into()
}

fn default_timeout() -> u64 {
    30
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    4000
}

fn default_fragment_selector() -> String {
    "[itemprop=petsAllowed]".into()
}

fn default_ttl_hours() -> u64 {
    48
}

fn default_store_path() -> String {
    "orpets-store.json".into()
}

fn default_listing_selector() -> String {
    ".listing".into()
}

fn default_link_selector() -> String {
    ".listing__link".into()
}

fn default_viewport_height() -> f64 {
    900.0
}

fn default_card_height() -> f64 {
    320.0
}

fn default_scroll_step() -> f64 {
    450.0
}
