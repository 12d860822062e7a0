//! Riot Games API access.
//!
//! The `RiotApi` trait is the seam between request handling and the network:
//! `RiotClient` talks to the real REST API, tests substitute an in-memory
//! implementation.

mod client;

pub use client::RiotClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AccountDto, MatchDto, SummonerDto};

/// Errors that can occur talking to the Riot API.
#[derive(Debug, Error)]
pub enum RiotError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid API key header value")]
    InvalidApiKey,
}

impl RiotError {
    /// Whether the upstream answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RiotError::HttpStatus { status: 404, .. })
    }
}

/// Which match-history API family to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// Teamfight Tactics match-v1
    Tft,
    /// League of Legends match-v5 (Arena lives here)
    Lol,
}

impl MatchSource {
    /// Path segments leading to the match collection.
    pub fn base_segments(self) -> &'static [&'static str] {
        match self {
            MatchSource::Tft => &["tft", "match", "v1", "matches"],
            MatchSource::Lol => &["lol", "match", "v5", "matches"],
        }
    }
}

/// Upstream operations the dashboard depends on.
#[async_trait]
pub trait RiotApi: Send + Sync {
    /// Resolve a Riot ID (game name + tag line) to an account.
    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, RiotError>;

    /// Look up a summoner on one platform. Errors when the player is not there.
    async fn summoner_by_puuid(
        &self,
        platform: &str,
        puuid: &str,
    ) -> Result<SummonerDto, RiotError>;

    /// Most recent match ids first.
    async fn match_ids(
        &self,
        source: MatchSource,
        match_region: &str,
        puuid: &str,
        count: u32,
    ) -> Result<Vec<String>, RiotError>;

    async fn match_detail(
        &self,
        source: MatchSource,
        match_region: &str,
        match_id: &str,
    ) -> Result<MatchDto, RiotError>;
}
