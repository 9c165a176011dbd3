pub mod types;

use std::path::Path;

use crate::error::{OrpetsError, Result};
use types::Config;

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        OrpetsError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    let config: Config = serde_yml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.scraper.max_delay_ms < config.scraper.min_delay_ms {
        return Err(OrpetsError::Config(format!(
            "scraper.max_delay_ms ({}) is below scraper.min_delay_ms ({})",
            config.scraper.max_delay_ms, config.scraper.min_delay_ms
        )));
    }
    let page = &config.page;
    for (name, value) in [
        ("page.viewport_height", page.viewport_height),
        ("page.card_height", page.card_height),
        ("page.header_offset", page.header_offset),
        ("page.scroll_step", page.scroll_step),
    ] {
        if !value.is_finite() {
            return Err(OrpetsError::Config(format!("{name} must be finite, got {value}")));
        }
    }
    if page.viewport_height <= 0.0 || page.card_height <= 0.0 {
        return Err(OrpetsError::Config(
            "page.viewport_height and page.card_height must be positive".into(),
        ));
    }
    if page.header_offset < 0.0 {
        return Err(OrpetsError::Config(
            "page.header_offset must not be negative".into(),
        ));
    }
    config.cache.ttl()?;
    Ok(())
}
