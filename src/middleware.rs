//! Hooks wrapped around service operations.
//!
//! A [`HookChain`] runs every hook's `before` in registration order, then the
//! operation, then every `after` in reverse order. A `before` that returns an
//! error short-circuits: the operation never runs and the remaining hooks are
//! skipped.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::Result;

/// How an operation finished, as seen by `after` hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Failed,
}

pub trait Hook: Send + Sync {
    fn before(&self, _operation: &str) -> Result<()> {
        Ok(())
    }

    fn after(&self, _operation: &str, _outcome: Outcome, _elapsed: Duration) {}
}

/// Logs start and finish of every operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOperation;

impl Hook for LogOperation {
    fn before(&self, operation: &str) -> Result<()> {
        info!(operation, "Executing");
        Ok(())
    }

    fn after(&self, operation: &str, outcome: Outcome, elapsed: Duration) {
        let elapsed_ms = elapsed.as_millis() as u64;
        match outcome {
            Outcome::Ok => info!(operation, elapsed_ms, "Finished"),
            Outcome::Failed => warn!(operation, elapsed_ms, "Finished with error"),
        }
    }
}

#[derive(Clone, Default)]
pub struct HookChain {
    hooks: Vec<Arc<dyn Hook>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain with only [`LogOperation`].
    pub fn logging() -> Self {
        Self::new().with(LogOperation)
    }

    pub fn with(mut self, hook: impl Hook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub async fn run<T, Fut>(&self, operation: &str, fut: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        for hook in &self.hooks {
            hook.before(operation)?;
        }

        let started = Instant::now();
        let result = fut.await;
        let outcome = if result.is_ok() {
            Outcome::Ok
        } else {
            Outcome::Failed
        };
        let elapsed = started.elapsed();

        for hook in self.hooks.iter().rev() {
            hook.after(operation, outcome, elapsed);
        }
        result
    }
}

#[cfg(test)]
mod tests;
