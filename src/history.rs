//! Match history: account lookup, region resolution and match fetching.
//!
//! A search runs strictly in sequence: account, region probes, match ids,
//! then one detail request per id. A failed or empty match is skipped and
//! the rest are still fetched.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, RegionEntry};
use crate::models::{GameMode, MatchRecord};
use crate::normalize::Normalizer;
use crate::resolve::{resolve_region_cached, RegionCache};
use crate::riot::{MatchSource, RiotApi};

/// Reasons a search ends without results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Missing game name or tag line")]
    MissingIdentifiers,

    #[error("No account found for {0}")]
    AccountNotFound(String),

    #[error("Could not determine the correct region")]
    RegionNotFound,

    #[error("No match history available")]
    NoMatchHistory,
}

/// Upper bound on matches fetched per search.
pub const MAX_MATCH_COUNT: u32 = 100;

/// Which matches to fetch and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchQuery {
    pub source: MatchSource,
    pub count: u32,
    /// Keep only matches of this mode
    pub mode_filter: Option<GameMode>,
}

impl MatchQuery {
    /// Recent TFT matches of any mode. `count` is clamped to 1..=100.
    pub fn tft(count: u32) -> Self {
        Self {
            source: MatchSource::Tft,
            count: count.clamp(1, MAX_MATCH_COUNT),
            mode_filter: None,
        }
    }

    /// Recent League matches, Arena only. `count` is clamped to 1..=100.
    pub fn arena(count: u32) -> Self {
        Self {
            source: MatchSource::Lol,
            count: count.clamp(1, MAX_MATCH_COUNT),
            mode_filter: Some(GameMode::Arena),
        }
    }
}

/// Result of a successful search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub puuid: String,
    pub riot_id: String,
    pub region: RegionEntry,
    pub matches: Vec<MatchRecord>,
}

/// Fetches and normalizes a player's recent matches.
pub struct MatchHistory<'a> {
    api: &'a dyn RiotApi,
    catalog: &'a Catalog,
    region_cache: Option<&'a RegionCache>,
}

impl<'a> MatchHistory<'a> {
    pub fn new(api: &'a dyn RiotApi, catalog: &'a Catalog) -> Self {
        Self {
            api,
            catalog,
            region_cache: None,
        }
    }

    pub fn with_region_cache(mut self, cache: Option<&'a RegionCache>) -> Self {
        self.region_cache = cache;
        self
    }

    /// Look up a Riot ID and return its recent matches.
    pub async fn search(
        &self,
        game_name: &str,
        tag_line: &str,
        query: MatchQuery,
    ) -> Result<SearchOutcome, SearchError> {
        let game_name = game_name.trim();
        let tag_line = tag_line.trim().trim_start_matches('#');
        if game_name.is_empty() || tag_line.is_empty() {
            return Err(SearchError::MissingIdentifiers);
        }
        let riot_id = format!("{}#{}", game_name, tag_line);

        let account = match self.api.account_by_riot_id(game_name, tag_line).await {
            Ok(account) => account,
            Err(e) => {
                debug!("Account lookup for {} failed: {}", riot_id, e);
                return Err(SearchError::AccountNotFound(riot_id));
            }
        };

        let region = resolve_region_cached(
            self.api,
            self.catalog.regions(),
            self.region_cache,
            &account.puuid,
        )
        .await
        .ok_or(SearchError::RegionNotFound)?;

        let matches = self
            .fetch_matches(&account.puuid, &region.match_region, query)
            .await?;

        info!(
            "Search for {} returned {} matches from {}",
            riot_id,
            matches.len(),
            region.code
        );

        let riot_id = match (account.game_name, account.tag_line) {
            (Some(name), Some(tag)) => format!("{}#{}", name, tag),
            _ => riot_id,
        };

        Ok(SearchOutcome {
            puuid: account.puuid,
            riot_id,
            region,
            matches,
        })
    }

    /// Fetch match ids, then each match in order. Fails only when the id list
    /// itself is unavailable or empty.
    pub async fn fetch_matches(
        &self,
        puuid: &str,
        match_region: &str,
        query: MatchQuery,
    ) -> Result<Vec<MatchRecord>, SearchError> {
        let ids = match self
            .api
            .match_ids(query.source, match_region, puuid, query.count)
            .await
        {
            Ok(ids) if !ids.is_empty() => ids,
            Ok(_) => return Err(SearchError::NoMatchHistory),
            Err(e) => {
                warn!("Match id lookup failed: {}", e);
                return Err(SearchError::NoMatchHistory);
            }
        };

        let mut matches = Vec::with_capacity(ids.len());
        for match_id in &ids {
            if let Some(record) = self.fetch_match(match_id, match_region, query).await {
                matches.push(record);
            }
        }

        if matches.len() < ids.len() {
            debug!("Kept {} of {} matches", matches.len(), ids.len());
        }
        Ok(matches)
    }

    /// Fetch and normalize one match, or `None` if it should be skipped.
    async fn fetch_match(
        &self,
        match_id: &str,
        match_region: &str,
        query: MatchQuery,
    ) -> Option<MatchRecord> {
        let dto = match self
            .api
            .match_detail(query.source, match_region, match_id)
            .await
        {
            Ok(dto) => dto,
            Err(e) => {
                warn!("Skipping match {}: {}", match_id, e);
                return None;
            }
        };

        let info = dto.info;
        if info.participants.is_empty() {
            debug!("Skipping match {}: no participants", match_id);
            return None;
        }

        let mode = GameMode::classify(&info);
        if let Some(wanted) = query.mode_filter {
            if mode != wanted {
                debug!("Skipping match {}: mode {} is not {}", match_id, mode, wanted);
                return None;
            }
        }

        let participants = Normalizer::new(self.catalog).normalize(&info.participants, mode);
        let started_at = info.game_datetime.or(info.game_creation);

        Some(
            MatchRecord::new(match_id.to_string(), mode, participants)
                .with_started_at_millis(started_at),
        )
    }
}
