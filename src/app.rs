//! Presentation controller.
//!
//! [`App`] lives on the presentation context. It owns the [`ViewState`]
//! snapshot, submits fetches through the [`Bridge`], and applies deliveries
//! when [`App::tick`] drains the queue. Nothing else ever mutates the state.

use chrono::Local;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::bridge::{Bridge, DeliveryQueue, Dispatcher, RefreshTimer};
use crate::core::cache::CacheStatus;
use crate::espn::types::{PlayerRecord, Standings};
use crate::export::{
    export_with_prompt, flatten_standings, validate_players, validate_standings, ExportData,
    Exporter,
};
use crate::service::{Fetched, StatsService};
use crate::{Result, Season, StatCategory, StatsError};

pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Standings,
    Leaders(StatCategory),
}

/// Everything the presentation layer renders from.
#[derive(Debug, Default)]
pub struct ViewState {
    pub active_view: View,
    pub season: Season,
    pub standings: Standings,
    pub leaders: HashMap<StatCategory, Vec<PlayerRecord>>,
    pub images: HashMap<String, Vec<u8>>,
    pub status: String,
    /// `DD-MM-YYYY HH:MM:SS` of the last delivery that carried fresh data.
    pub last_updated: Option<String>,
    /// Bumped on every delivery that replaces data.
    pub revision: u64,
    /// Submitted fetches not yet delivered.
    pub pending: usize,
}

impl ViewState {
    pub fn leaders_for(&self, category: StatCategory) -> &[PlayerRecord] {
        self.leaders.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    fn apply_standings(&mut self, season: Season, result: Result<Fetched<Standings>>) {
        self.pending = self.pending.saturating_sub(1);
        if season != self.season {
            debug!(%season, current = %self.season, "Ignoring standings for another season");
            return;
        }
        match result {
            Ok(fetched) => {
                self.status = status_message("Standings", fetched.status);
                if fetched.value.is_empty() {
                    return;
                }
                self.standings = fetched.value;
                self.mark_updated(fetched.status);
            }
            Err(e) => self.status = format!("Error loading standings: {e}"),
        }
    }

    fn apply_leaders(
        &mut self,
        season: Season,
        category: StatCategory,
        result: Result<Fetched<Vec<PlayerRecord>>>,
    ) {
        self.pending = self.pending.saturating_sub(1);
        if season != self.season {
            debug!(%season, %category, "Ignoring leaders for another season");
            return;
        }
        match result {
            Ok(fetched) => {
                self.status = status_message(category.display_name(), fetched.status);
                if fetched.value.is_empty() {
                    return;
                }
                self.leaders.insert(category, fetched.value);
                self.mark_updated(fetched.status);
            }
            Err(e) => {
                self.status = format!("Error loading {}: {e}", category.display_name());
            }
        }
    }

    fn apply_image(&mut self, url: String, bytes: Option<Vec<u8>>) {
        self.pending = self.pending.saturating_sub(1);
        if let Some(bytes) = bytes {
            self.images.insert(url, bytes);
        }
    }

    /// A stale fallback re-renders but keeps the previous timestamp.
    fn mark_updated(&mut self, status: CacheStatus) {
        self.revision += 1;
        if status != CacheStatus::Stale {
            self.last_updated = Some(Local::now().format(TIMESTAMP_FORMAT).to_string());
        }
    }
}

fn status_message(what: &str, status: CacheStatus) -> String {
    match status {
        CacheStatus::Hit | CacheStatus::Miss | CacheStatus::Refreshed => {
            format!("{what} updated")
        }
        CacheStatus::Stale => format!("{what}: refresh failed, showing cached data"),
        CacheStatus::Empty => format!("{what}: no data available"),
    }
}

fn export_error_status(e: &StatsError) -> String {
    match e {
        StatsError::Validation { message } => message.clone(),
        other => format!("Export failed: {other}"),
    }
}

pub struct App {
    service: Arc<StatsService>,
    bridge: Bridge,
    queue: DeliveryQueue<ViewState>,
    timer: RefreshTimer,
    leaders_limit: Option<usize>,
    state: ViewState,
}

impl App {
    pub fn new(service: Arc<StatsService>, bridge: Bridge) -> Self {
        let timer = RefreshTimer::new(service.settings().refresh_interval(), Instant::now());
        Self {
            service,
            bridge,
            queue: DeliveryQueue::new(),
            timer,
            leaders_limit: None,
            state: ViewState::default(),
        }
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.state.season = season;
        self
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.state.active_view = view;
        self
    }

    /// Leaders page size for this session instead of the configured one.
    pub fn with_leaders_limit(mut self, limit: Option<usize>) -> Self {
        self.leaders_limit = limit;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dispatcher(&self) -> Dispatcher<ViewState> {
        self.queue.dispatcher()
    }

    pub fn is_idle(&self) -> bool {
        self.state.pending == 0
    }

    pub fn request_standings(&mut self) {
        let service = Arc::clone(&self.service);
        let season = self.state.season;
        self.state.pending += 1;
        self.state.status = "Loading standings...".to_string();
        self.bridge.submit(
            &self.queue.dispatcher(),
            async move { service.fetch_standings(Some(season)).await },
            move |state: &mut ViewState, result| state.apply_standings(season, result),
        );
    }

    pub fn request_leaders(&mut self, category: StatCategory) {
        let service = Arc::clone(&self.service);
        let season = self.state.season;
        let limit = self.leaders_limit;
        self.state.pending += 1;
        self.state.status = format!("Loading {}...", category.display_name());
        self.bridge.submit(
            &self.queue.dispatcher(),
            async move { service.fetch_leaders(Some(season), category, limit).await },
            move |state: &mut ViewState, result| state.apply_leaders(season, category, result),
        );
    }

    /// Load an image independently of any data refresh.
    pub fn request_image(&mut self, url: &str) {
        let service = Arc::clone(&self.service);
        let url = url.to_string();
        let key = url.clone();
        self.state.pending += 1;
        self.bridge.submit(
            &self.queue.dispatcher(),
            async move { Ok::<_, StatsError>(service.fetch_image(&url).await) },
            move |state: &mut ViewState, result: Result<Option<Vec<u8>>>| {
                state.apply_image(key, result.ok().flatten())
            },
        );
    }

    pub fn refresh_active(&mut self) {
        match self.state.active_view {
            View::Standings => self.request_standings(),
            View::Leaders(category) => self.request_leaders(category),
        }
    }

    /// Switch views and refresh the new one right away.
    pub fn set_active_view(&mut self, view: View) {
        self.state.active_view = view;
        self.timer.reset(Instant::now());
        self.refresh_active();
    }

    /// Change season and refresh the active view right away.
    pub fn set_season(&mut self, season: Season) {
        if season == self.state.season {
            return;
        }
        info!(%season, "Season changed");
        self.state.season = season;
        self.timer.reset(Instant::now());
        self.refresh_active();
    }

    /// Apply queued deliveries, then fire the refresh timer if due.
    /// Returns the number of deliveries applied.
    pub fn tick(&mut self, now: Instant) -> usize {
        let applied = self.queue.drain(&mut self.state);
        if self.timer.poll(now) {
            debug!(view = ?self.state.active_view, "Refresh timer fired");
            self.refresh_active();
        }
        applied
    }

    /// Block up to `timeout` for the next delivery and apply it.
    pub fn wait_for_delivery(&mut self, timeout: Duration) -> usize {
        self.queue.wait(&mut self.state, timeout)
    }

    /// Time left before the refresh timer fires.
    pub fn until_next_refresh(&self, now: Instant) -> Duration {
        self.timer.time_until_due(now)
    }

    /// Export the current standings. Validation happens here, on the
    /// snapshot; the filename prompt and save run through the bridge.
    pub fn export_standings<P>(&mut self, exporter: Arc<dyn Exporter>, prompt: P) -> Result<()>
    where
        P: FnOnce(&mut ViewState, &str) -> Option<PathBuf> + Send + 'static,
    {
        let rows = flatten_standings(&self.state.standings);
        if let Err(e) = validate_standings(&rows) {
            self.state.status = export_error_status(&e);
            return Err(e);
        }
        self.submit_export(exporter, ExportData::Standings(rows), prompt);
        Ok(())
    }

    pub fn export_leaders<P>(
        &mut self,
        category: StatCategory,
        exporter: Arc<dyn Exporter>,
        prompt: P,
    ) -> Result<()>
    where
        P: FnOnce(&mut ViewState, &str) -> Option<PathBuf> + Send + 'static,
    {
        let players = self.state.leaders_for(category).to_vec();
        if let Err(e) = validate_players(category, &players) {
            self.state.status = export_error_status(&e);
            return Err(e);
        }
        self.submit_export(exporter, ExportData::Leaders(players), prompt);
        Ok(())
    }

    fn submit_export<P>(&mut self, exporter: Arc<dyn Exporter>, data: ExportData, prompt: P)
    where
        P: FnOnce(&mut ViewState, &str) -> Option<PathBuf> + Send + 'static,
    {
        let dispatcher = self.queue.dispatcher();
        self.state.pending += 1;
        self.bridge.submit(
            &self.queue.dispatcher(),
            async move { export_with_prompt(&dispatcher, exporter, data, prompt).await },
            |state: &mut ViewState, result| {
                state.pending = state.pending.saturating_sub(1);
                state.status = match result {
                    Ok(outcome) => outcome.status_message(),
                    Err(e) => export_error_status(&e),
                };
            },
        );
    }
}
