//! Reference resolution against ESPN's core API.
//!
//! Every hop of a reference chain is one [`Resolver::resolve`] call: a single
//! GET with a timeout, JSON parsed only on `200 OK`. Retrying is left to
//! callers.

use async_trait::async_trait;
use reqwest::{header::HeaderMap, header::HeaderValue, header::ACCEPT, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{Result, StatsError};


pub const USER_AGENT: &str = concat!("nfl-stats-hub/", env!("CARGO_PKG_VERSION"));

/// Something that can follow a `$ref` URL.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Fetch `url` and parse the body as JSON.
    async fn resolve(&self, url: &str, timeout: Duration) -> Result<Value>;

    /// Fetch `url` and return the raw body.
    async fn fetch_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>>;
}

/// Resolve `url` and deserialize it into `T`.
///
/// A document that is valid JSON but does not have the expected shape is a
/// parse failure, same as malformed JSON.
pub async fn resolve_as<T: DeserializeOwned>(
    resolver: &dyn Resolver,
    url: &str,
    timeout: Duration,
) -> Result<T> {
    let value = resolver.resolve(url, timeout).await?;
    serde_json::from_value(value).map_err(|source| StatsError::Parse {
        url: url.to_string(),
        source,
    })
}

/// Headers sent with every request.
pub fn common_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h
}

/// [`Resolver`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpResolver {
    client: Client,
}

impl HttpResolver {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(common_headers())
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str, timeout: Duration) -> Result<reqwest::Response> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url, status = status.as_u16(), "Unexpected status from upstream");
            return Err(StatsError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Resolver for HttpResolver {
    async fn resolve(&self, url: &str, timeout: Duration) -> Result<Value> {
        let body = self
            .get(url, timeout)
            .await?
            .bytes()
            .await
            .map_err(|e| classify(url, e))?;

        serde_json::from_slice(&body).map_err(|source| StatsError::Parse {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch_bytes(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        let body = self
            .get(url, timeout)
            .await?
            .bytes()
            .await
            .map_err(|e| classify(url, e))?;
        Ok(body.to_vec())
    }
}

fn classify(url: &str, err: reqwest::Error) -> StatsError {
    if err.is_timeout() {
        StatsError::Timeout {
            url: url.to_string(),
        }
    } else {
        StatsError::Network {
            url: url.to_string(),
            source: err,
        }
    }
}
