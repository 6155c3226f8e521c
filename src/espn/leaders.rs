//! Leaders aggregator.
//!
//! The upstream leaderboard is already ranked; ranks here follow fetch order
//! and are never recomputed from the values.

use futures::future::join_all;
use std::time::Duration;
use tracing::{info, warn};

use super::http::{resolve_as, Resolver};
use super::records::build_player_record;
use super::types::{decode_entry, Leader, LeadersDocument, PlayerRecord};
use crate::{Result, Season, StatCategory};


pub fn leaders_url(base_url: &str, season: Season, limit: usize) -> String {
    format!(
        "{}/seasons/{}/types/2/leaders?limit={}",
        base_url.trim_end_matches('/'),
        season,
        limit
    )
}

/// Fetch the top `limit` leaders of `category`.
///
/// Errors only when the leaders document cannot be fetched. A category
/// missing from the document gives an empty list; malformed stubs and leaders
/// whose athlete cannot be resolved are dropped, and the remaining ranks stay
/// contiguous.
pub async fn aggregate_leaders(
    resolver: &dyn Resolver,
    base_url: &str,
    season: Season,
    category: StatCategory,
    limit: usize,
    timeout: Duration,
) -> Result<Vec<PlayerRecord>> {
    let url = leaders_url(base_url, season, limit);
    let doc: LeadersDocument = resolve_as(resolver, &url, timeout).await?;

    let Some(found) = doc
        .categories
        .iter()
        .find(|c| c.name == category.api_name())
    else {
        info!(%category, %season, "Category not present in leaders document");
        return Ok(Vec::new());
    };

    let url = url.as_str();
    let built = join_all(found.leaders.iter().take(limit).map(|raw| async move {
        let leader: Leader = decode_entry(raw, url)?;
        build_player_record(resolver, &leader, timeout).await
    }))
    .await;

    let players: Vec<PlayerRecord> = built
        .into_iter()
        .filter_map(|result| match result {
            Ok(player) => Some(player),
            Err(e) => {
                warn!(%category, error = %e, "Skipping leader");
                None
            }
        })
        .enumerate()
        .map(|(idx, player)| PlayerRecord {
            rank: idx + 1,
            ..player
        })
        .collect();

    info!(%category, %season, count = players.len(), "Leaders fetched");
    Ok(players)
}
