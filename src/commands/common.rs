//! Helpers shared by the command handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{
    app::App,
    bridge::Bridge,
    config::Settings,
    espn::http::{HttpResolver, Resolver},
    service::StatsService,
    Result, StatsError,
};

/// Upper bound for one command to receive all of its deliveries.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(120);

/// Presentation controller over the live API.
pub fn build_app(settings: &Settings) -> Result<App> {
    let resolver: Arc<dyn Resolver> = Arc::new(HttpResolver::new()?);
    build_app_with(resolver, settings)
}

pub fn build_app_with(resolver: Arc<dyn Resolver>, settings: &Settings) -> Result<App> {
    let service = Arc::new(StatsService::new(resolver, settings.clone()));
    Ok(App::new(service, Bridge::start()?))
}

/// Apply deliveries until nothing is in flight.
pub fn wait_until_idle(app: &mut App, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    while !app.is_idle() {
        let now = Instant::now();
        if now >= deadline {
            return Err(StatsError::TaskFailed {
                message: format!("no result within {}s", timeout.as_secs()),
            });
        }
        app.wait_for_delivery(deadline - now);
    }
    Ok(())
}
