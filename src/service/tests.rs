//! Unit tests for the stats service

use super::*;
use crate::espn::leaders::leaders_url;
use crate::espn::standings::standings_url;
use crate::espn::testing::StaticResolver;
use crate::middleware::{Hook, Outcome};
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

const API: &str = "http://api.test";

fn season() -> Season {
    Season::new(2024)
}

fn settings() -> Settings {
    Settings {
        api_base_url: API.to_string(),
        leaders_limit: 3,
        ..Settings::default()
    }
}

/// AFC standings with two AFC East teams; NFC is left unregistered (404).
fn register_standings(resolver: &StaticResolver) {
    let entry = |id: u32, wins: u32| {
        json!({
            "team": { "$ref": format!("{API}/teams/{id}") },
            "records": [{ "stats": [
                { "name": "wins", "value": wins },
                { "name": "losses", "value": 17 - wins },
                { "name": "ties", "value": 0 },
                { "name": "winPercent", "value": wins as f64 / 17.0 }
            ]}]
        })
    };
    resolver.insert(
        standings_url(API, season(), 8),
        json!({ "standings": [entry(1, 8), entry(2, 13)] }),
    );
    for (id, abbr) in [(1, "MIA"), (2, "BUF")] {
        resolver.insert(
            format!("{API}/teams/{id}"),
            json!({
                "displayName": format!("Team {abbr}"),
                "abbreviation": abbr,
                "groups": { "$ref": format!("{API}/groups/1") }
            }),
        );
    }
    resolver.insert(format!("{API}/groups/1"), json!({ "name": "AFC East" }));
}

fn register_leaders(resolver: &StaticResolver, limit: usize) {
    let leaders: Vec<Value> = (1..=3)
        .map(|id| {
            json!({
                "value": 100.0 - id as f64,
                "athlete": { "$ref": format!("{API}/athletes/{id}") }
            })
        })
        .collect();
    resolver.insert(
        leaders_url(API, season(), limit),
        json!({ "categories": [{ "name": "sacks", "leaders": leaders }] }),
    );
    for id in 1..=3 {
        resolver.insert(
            format!("{API}/athletes/{id}"),
            json!({ "id": id.to_string(), "displayName": format!("Rusher {id}") }),
        );
    }
}

fn service(resolver: &Arc<StaticResolver>) -> StatsService {
    let resolver: Arc<dyn Resolver> = resolver.clone();
    StatsService::new(resolver, settings())
}

#[cfg(test)]
mod standings_service_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_standings_cached_within_ttl() {
        let resolver = Arc::new(StaticResolver::new());
        register_standings(&resolver);
        let service = service(&resolver);

        let first = service.fetch_standings(Some(season())).await.unwrap();
        assert_eq!(first.status, CacheStatus::Miss);
        assert_eq!(first.value.team_count(), 2);
        let teams = first.value.division("AFC East");
        assert_eq!(teams[0].abbreviation, "BUF");
        assert_eq!(teams[1].abbreviation, "MIA");

        let requests = resolver.request_count();
        let second = service.fetch_standings(Some(season())).await.unwrap();
        assert_eq!(second.status, CacheStatus::Hit);
        assert_eq!(second.value, first.value);
        assert_eq!(resolver.request_count(), requests);
    }

    #[tokio::test(start_paused = true)]
    async fn test_standings_fall_back_to_stale_when_refresh_is_empty() {
        let resolver = Arc::new(StaticResolver::new());
        register_standings(&resolver);
        let service = service(&resolver);

        let first = service.fetch_standings(Some(season())).await.unwrap();

        resolver.set_failure(standings_url(API, season(), 8), 503);
        tokio::time::advance(Duration::from_secs(601)).await;

        let second = service.fetch_standings(Some(season())).await.unwrap();
        assert_eq!(second.status, CacheStatus::Stale);
        assert_eq!(second.value, first.value);
    }

    #[tokio::test]
    async fn test_standings_empty_when_nothing_ever_fetched() {
        let resolver = Arc::new(StaticResolver::new());
        let service = service(&resolver);

        let fetched = service.fetch_standings(Some(season())).await.unwrap();
        assert_eq!(fetched.status, CacheStatus::Empty);
        assert!(fetched.value.is_empty());
    }
}

#[cfg(test)]
mod leaders_service_tests {
    use super::*;

    #[tokio::test]
    async fn test_leaders_use_configured_limit() {
        let resolver = Arc::new(StaticResolver::new());
        register_leaders(&resolver, 3);
        let service = service(&resolver);

        let fetched = service
            .fetch_leaders(Some(season()), StatCategory::Sacks, None)
            .await
            .unwrap();

        assert_eq!(fetched.status, CacheStatus::Miss);
        let ranks: Vec<usize> = fetched.value.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_leaders_limit_override_is_a_separate_key() {
        let resolver = Arc::new(StaticResolver::new());
        register_leaders(&resolver, 3);
        register_leaders(&resolver, 2);
        let service = service(&resolver);

        let three = service
            .fetch_leaders(Some(season()), StatCategory::Sacks, None)
            .await
            .unwrap();
        let two = service
            .fetch_leaders(Some(season()), StatCategory::Sacks, Some(2))
            .await
            .unwrap();

        assert_eq!(three.value.len(), 3);
        assert_eq!(two.value.len(), 2);
        assert_eq!(two.status, CacheStatus::Miss);
    }

    #[tokio::test]
    async fn test_missing_category_is_empty_status() {
        let resolver = Arc::new(StaticResolver::new());
        register_leaders(&resolver, 3);
        let service = service(&resolver);

        let fetched = service
            .fetch_leaders(Some(season()), StatCategory::Interceptions, None)
            .await
            .unwrap();

        assert_eq!(fetched.status, CacheStatus::Empty);
        assert!(fetched.value.is_empty());
    }
}

#[cfg(test)]
mod image_and_hook_tests {
    use super::*;

    struct Names(Arc<Mutex<Vec<String>>>);

    impl Hook for Names {
        fn after(&self, operation: &str, _outcome: Outcome, _elapsed: Duration) {
            self.0.lock().unwrap().push(operation.to_string());
        }
    }

    #[tokio::test]
    async fn test_fetch_image_bytes() {
        let resolver = Arc::new(
            StaticResolver::new().with("http://img.test/logo.png", json!("PNGDATA")),
        );
        let service = service(&resolver);

        assert_eq!(
            service.fetch_image("http://img.test/logo.png").await,
            Some(b"PNGDATA".to_vec())
        );
        assert_eq!(service.fetch_image("http://img.test/missing.png").await, None);
    }

    #[tokio::test]
    async fn test_operations_pass_through_hooks() {
        let resolver = Arc::new(StaticResolver::new());
        register_leaders(&resolver, 3);
        let names = Arc::new(Mutex::new(Vec::new()));
        let service = service(&resolver).with_hooks(HookChain::new().with(Names(names.clone())));

        service.fetch_standings(Some(season())).await.unwrap();
        service
            .fetch_leaders(Some(season()), StatCategory::Sacks, None)
            .await
            .unwrap();

        assert_eq!(*names.lock().unwrap(), vec!["fetch_standings", "fetch_leaders"]);
    }
}
