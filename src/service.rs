//! Inbound API for the presentation layer.
//!
//! Each data call goes through the hook chain and the TTL cache. An aggregate
//! that comes back empty counts as a failed fetch, so the cache falls back to
//! the last good value instead of replacing it with nothing.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::core::cache::{leaders_key, standings_key, CacheStatus, TtlCache};
use crate::espn::http::Resolver;
use crate::espn::leaders::aggregate_leaders;
use crate::espn::standings::{aggregate_standings, CONFERENCES};
use crate::espn::types::{PlayerRecord, Standings};
use crate::middleware::HookChain;
use crate::{Result, Season, StatCategory, StatsError};

/// A value together with how the cache produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    pub status: CacheStatus,
}

pub struct StatsService {
    resolver: Arc<dyn Resolver>,
    settings: Settings,
    standings_cache: TtlCache<Standings>,
    leaders_cache: TtlCache<Vec<PlayerRecord>>,
    hooks: HookChain,
}

impl StatsService {
    pub fn new(resolver: Arc<dyn Resolver>, settings: Settings) -> Self {
        Self {
            resolver,
            settings,
            standings_cache: TtlCache::new(),
            leaders_cache: TtlCache::new(),
            hooks: HookChain::logging(),
        }
    }

    pub fn with_hooks(mut self, hooks: HookChain) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Standings for `season` (previous calendar year when `None`).
    pub async fn fetch_standings(&self, season: Option<Season>) -> Result<Fetched<Standings>> {
        let season = season.unwrap_or_default();
        let key = standings_key(season);

        self.hooks
            .run("fetch_standings", async {
                let (value, status) = self
                    .standings_cache
                    .get_or_fetch(&key, self.settings.standings_ttl(), || async {
                        let standings = aggregate_standings(
                            self.resolver.as_ref(),
                            &self.settings.api_base_url,
                            season,
                            &CONFERENCES,
                            self.settings.request_timeout(),
                        )
                        .await;
                        if standings.is_empty() {
                            return Err(StatsError::NoData);
                        }
                        Ok(standings)
                    })
                    .await;
                debug!(%season, ?status, teams = value.team_count(), "Standings ready");
                Ok(Fetched { value, status })
            })
            .await
    }

    /// Leaders of `category`, capped at `limit` or the configured page size.
    pub async fn fetch_leaders(
        &self,
        season: Option<Season>,
        category: StatCategory,
        limit: Option<usize>,
    ) -> Result<Fetched<Vec<PlayerRecord>>> {
        let season = season.unwrap_or_default();
        let limit = limit.unwrap_or(self.settings.leaders_limit);
        let key = leaders_key(season, category, limit);

        self.hooks
            .run("fetch_leaders", async {
                let (value, status) = self
                    .leaders_cache
                    .get_or_fetch(&key, self.settings.leaders_ttl(), || async {
                        let players = aggregate_leaders(
                            self.resolver.as_ref(),
                            &self.settings.api_base_url,
                            season,
                            category,
                            limit,
                            self.settings.request_timeout(),
                        )
                        .await?;
                        if players.is_empty() {
                            return Err(StatsError::NoData);
                        }
                        Ok(players)
                    })
                    .await;
                debug!(%season, %category, ?status, players = value.len(), "Leaders ready");
                Ok(Fetched { value, status })
            })
            .await
    }

    /// Raw image bytes, or `None` when the image cannot be fetched.
    pub async fn fetch_image(&self, url: &str) -> Option<Vec<u8>> {
        match self
            .resolver
            .fetch_bytes(url, self.settings.image_timeout())
            .await
        {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(url, error = %e, "Image unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
