use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrpetsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error {status} for {url}")]
    Network { url: String, status: u16 },

    #[error("Failed to parse HTML response: {reason}")]
    Parse { reason: String },

    #[error("Listing {index} has no detail link")]
    MissingLink { index: usize },

    #[error("Malformed store record at '{key}': {reason}")]
    Storage { key: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, OrpetsError>;
