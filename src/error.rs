//! Error types for the NFL stats hub

use thiserror::Error;


pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Network failure for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Malformed JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{entity} is missing required field '{field}'")]
    MissingRequiredField { entity: String, field: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    InvalidSettings { message: String },

    #[error("Failed to parse season: {0}")]
    InvalidSeason(#[from] std::num::ParseIntError),

    #[error("Invalid stat category: {category}")]
    InvalidCategory { category: String },

    #[error("ESPN API returned no data")]
    NoData,

    #[error("Export validation failed: {message}")]
    Validation { message: String },

    #[error("Background task failed: {message}")]
    TaskFailed { message: String },

    #[error("Presentation context is no longer accepting deliveries")]
    BridgeClosed,
}

impl StatsError {
    /// True for failures of the transport itself (connection or timeout).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            StatsError::Timeout { .. } | StatsError::Network { .. } | StatsError::Http(_)
        )
    }

    pub fn missing_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        StatsError::MissingRequiredField {
            entity: entity.into(),
            field: field.into(),
        }
    }
}
