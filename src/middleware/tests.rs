//! Unit tests for the hook chain

use super::*;
use crate::StatsError;
use std::sync::Mutex;

/// Records every hook call as `"{name}:{phase}:{operation}"`.
struct Recorder {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
    reject: bool,
}

impl Recorder {
    fn new(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name,
            log: Arc::clone(log),
            reject: false,
        }
    }

    fn rejecting(mut self) -> Self {
        self.reject = true;
        self
    }
}

impl Hook for Recorder {
    fn before(&self, operation: &str) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:before:{}", self.name, operation));
        if self.reject {
            return Err(StatsError::Validation {
                message: format!("{} rejected {}", self.name, operation),
            });
        }
        Ok(())
    }

    fn after(&self, operation: &str, outcome: Outcome, _elapsed: Duration) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:after:{}:{:?}", self.name, operation, outcome));
    }
}

#[cfg(test)]
mod hook_chain_tests {
    use super::*;

    #[tokio::test]
    async fn test_hooks_wrap_operation_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = HookChain::new()
            .with(Recorder::new("outer", &log))
            .with(Recorder::new("inner", &log));

        let value = chain.run("fetch_standings", async { Ok(42) }).await.unwrap();

        assert_eq!(value, 42);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "outer:before:fetch_standings",
                "inner:before:fetch_standings",
                "inner:after:fetch_standings:Ok",
                "outer:after:fetch_standings:Ok",
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_operation_reports_failure_and_passes_error_through() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = HookChain::new().with(Recorder::new("h", &log));

        let result: Result<()> = chain
            .run("fetch_leaders", async { Err(StatsError::NoData) })
            .await;

        assert!(matches!(result, Err(StatsError::NoData)));
        assert_eq!(log.lock().unwrap().last().unwrap(), "h:after:fetch_leaders:Failed");
    }

    #[tokio::test]
    async fn test_rejecting_before_hook_skips_operation() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let ran = Arc::new(Mutex::new(false));
        let chain = HookChain::new()
            .with(Recorder::new("first", &log).rejecting())
            .with(Recorder::new("second", &log));

        let ran_flag = Arc::clone(&ran);
        let result = chain
            .run("export", async move {
                *ran_flag.lock().unwrap() = true;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(StatsError::Validation { .. })));
        assert!(!*ran.lock().unwrap());
        assert_eq!(*log.lock().unwrap(), vec!["first:before:export"]);
    }

    #[tokio::test]
    async fn test_empty_chain_just_runs() {
        let chain = HookChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.run("noop", async { Ok("x") }).await.unwrap(), "x");
    }

    #[tokio::test]
    async fn test_logging_chain() {
        let chain = HookChain::logging();
        assert_eq!(chain.len(), 1);
        assert!(chain.run("op", async { Ok(()) }).await.is_ok());
    }
}
