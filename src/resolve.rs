//! Region resolution: find which platform hosts a player.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::catalog::RegionEntry;
use crate::riot::RiotApi;

/// Probe each region in order; the first platform whose summoner lookup
/// succeeds wins. Any error from a probe just means "not this region".
pub async fn resolve_region(
    api: &dyn RiotApi,
    regions: &[RegionEntry],
    puuid: &str,
) -> Option<RegionEntry> {
    for region in regions {
        match api.summoner_by_puuid(&region.platform, puuid).await {
            Ok(_) => {
                info!("Found player in region {}", region.code);
                return Some(region.clone());
            }
            Err(e) if e.is_not_found() => debug!("Player not on {}", region.code),
            Err(e) => warn!("Region {} probe failed: {}", region.code, e),
        }
    }
    None
}

/// Resolved regions keyed by PUUID, shared across requests.
///
/// Entries are never evicted, so the map grows by one per distinct player
/// for the life of the process. It is off unless `riot.cache_regions` is set.
#[derive(Debug, Default)]
pub struct RegionCache {
    entries: RwLock<HashMap<String, RegionEntry>>,
}

impl RegionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, puuid: &str) -> Option<RegionEntry> {
        self.entries.read().await.get(puuid).cloned()
    }

    /// Insert and return the number of cached players.
    pub async fn insert(&self, puuid: &str, region: RegionEntry) -> usize {
        let mut entries = self.entries.write().await;
        entries.insert(puuid.to_string(), region);
        entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Like [`resolve_region`], consulting and filling `cache` when given.
/// Failed resolutions are not cached.
pub async fn resolve_region_cached(
    api: &dyn RiotApi,
    regions: &[RegionEntry],
    cache: Option<&RegionCache>,
    puuid: &str,
) -> Option<RegionEntry> {
    let Some(cache) = cache else {
        return resolve_region(api, regions, puuid).await;
    };

    if let Some(region) = cache.get(puuid).await {
        debug!("Region cache hit for {}", puuid);
        return Some(region);
    }

    let region = resolve_region(api, regions, puuid).await?;
    let size = cache.insert(puuid, region.clone()).await;
    debug!("Region cache holds {} players", size);
    Some(region)
}
