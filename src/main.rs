use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use orpets::adapters::cache::expiring_store::ExpiringStore;
use orpets::adapters::page::static_page::StaticPage;
use orpets::adapters::scraper::client::PetScraper;
use orpets::adapters::store::file_store::FileStore;
use orpets::adapters::store::memory_store::MemoryStore;
use orpets::config::load_config;
use orpets::config::types::Config;
use orpets::pipeline::orchestrator::ScrollOrchestrator;
use orpets::pipeline::pet_text::PetTextService;
use orpets::pipeline::session::simulate_visit;
use orpets::ports::store::StringStore;

/// Add scraped pet policies to every listing of a results page.
#[derive(Debug, Parser)]
#[command(name = "orpets", version)]
struct Cli {
    /// Results page: a local HTML file or an http(s) URL.
    source: Option<String>,

    /// Path to the YAML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL used to resolve relative listing links in a local file.
    #[arg(long)]
    base_url: Option<Url>,

    /// Keep the cache in memory only.
    #[arg(long)]
    no_persist: bool,

    /// Sweep expired cache entries and exit.
    #[arg(long)]
    sweep_only: bool,
}

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [PathBuf::from("orpets.yaml"), exe_dir().join("orpets.yaml")];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

async fn load_results_page(
    source: &str,
    base_url: Option<Url>,
    config: &Config,
) -> Result<(String, Option<Url>)> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let url = Url::parse(source).with_context(|| format!("invalid page URL {source}"))?;
        let http = reqwest::Client::builder()
            .user_agent(&config.scraper.user_agent)
            .timeout(Duration::from_secs(config.scraper.request_timeout_secs))
            .build()?;
        let response = http.get(url.clone()).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok((html, Some(base_url.unwrap_or(url))))
    } else {
        let html = std::fs::read_to_string(source)
            .with_context(|| format!("failed to read results page {source}"))?;
        Ok((html, base_url))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout carries the rendered page)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(find_config_path);
    let config = load_config(&config_path)?;

    let backend: Arc<dyn StringStore> = if cli.no_persist {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::open(&config.cache.store_path)?)
    };

    // Housekeeping before anything reads the cache
    let swept = ExpiringStore::new(Arc::clone(&backend)).sweep_expired();
    if swept.failed > 0 {
        tracing::warn!(failed = swept.failed, "Some expired cache entries could not be removed");
    }

    if cli.sweep_only {
        return Ok(());
    }

    let source = cli
        .source
        .as_deref()
        .context("a results page (file or URL) is required unless --sweep-only is given")?;

    tracing::info!(source, "Loading results page");
    let (html, base_url) = load_results_page(source, cli.base_url, &config).await?;
    let page = Arc::new(StaticPage::parse(&html, base_url.as_ref(), &config.page)?);
    let relative = page.relative_link_count();
    if base_url.is_none() && relative > 0 {
        tracing::warn!(
            relative,
            "Page has relative listing links but no --base-url; those listings cannot be fetched"
        );
    }

    let scraper = Arc::new(PetScraper::new(&config.scraper)?);
    let service = Arc::new(PetTextService::with_ttl(
        ExpiringStore::new(backend),
        scraper,
        config.cache.ttl()?,
    ));

    let orchestrator = ScrollOrchestrator::new(Arc::clone(&page), service, config.scroll);
    let summary = simulate_visit(&orchestrator, config.page.scroll_step).await;
    orchestrator.shutdown().await;

    for failure in &summary.failed {
        tracing::warn!(index = failure.index, error = %failure.error, "Listing left without pet text");
    }

    println!("{}", page.render());
    Ok(())
}
