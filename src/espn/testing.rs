//! In-memory [`Resolver`] for exercising builders and aggregators without a
//! network.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};
use std::time::Duration;

use super::http::Resolver;
use crate::{Result, StatsError};

/// Serves canned documents by exact URL. Unknown URLs answer 404; URLs
/// registered with [`StaticResolver::fail`] answer with the given status.
#[derive(Default)]
pub struct StaticResolver {
    documents: Mutex<HashMap<String, Value>>,
    failures: Mutex<HashMap<String, u16>>,
    requests: AtomicUsize,
    log: Mutex<Vec<String>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, url: impl Into<String>, document: Value) -> Self {
        self.insert(url, document);
        self
    }

    pub fn insert(&self, url: impl Into<String>, document: Value) {
        if let Ok(mut docs) = self.documents.lock() {
            docs.insert(url.into(), document);
        }
    }

    pub fn fail(self, url: impl Into<String>, status: u16) -> Self {
        self.set_failure(url, status);
        self
    }

    /// Make `url` answer with `status` from now on.
    pub fn set_failure(&self, url: impl Into<String>, status: u16) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(url.into(), status);
        }
    }

    pub fn clear_failure(&self, url: &str) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.remove(url);
        }
    }

    /// Total number of requests served, failures included.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// How many times `url` was requested.
    pub fn requests_for(&self, url: &str) -> usize {
        self.log
            .lock()
            .map(|log| log.iter().filter(|u| *u == url).count())
            .unwrap_or(0)
    }

    fn lookup(&self, url: &str) -> Result<Value> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut log) = self.log.lock() {
            log.push(url.to_string());
        }

        let status = self
            .failures
            .lock()
            .ok()
            .and_then(|f| f.get(url).copied());
        if let Some(status) = status {
            return Err(StatsError::UpstreamStatus {
                url: url.to_string(),
                status,
            });
        }

        self.documents
            .lock()
            .ok()
            .and_then(|docs| docs.get(url).cloned())
            .ok_or_else(|| StatsError::UpstreamStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[async_trait]
impl Resolver for StaticResolver {
    async fn resolve(&self, url: &str, _timeout: Duration) -> Result<Value> {
        self.lookup(url)
    }

    async fn fetch_bytes(&self, url: &str, _timeout: Duration) -> Result<Vec<u8>> {
        let value = self.lookup(url)?;
        Ok(value
            .as_str()
            .map(|s| s.as_bytes().to_vec())
            .unwrap_or_else(|| value.to_string().into_bytes()))
    }
}
