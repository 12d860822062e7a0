//! HTTP client for the Riot REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{MatchSource, RiotApi, RiotError};
use crate::config::RiotConfig;
use crate::models::{AccountDto, MatchDto, SummonerDto};

const RIOT_TOKEN_HEADER: &str = "x-riot-token";

/// Riot API client. Every request carries the API key header.
pub struct RiotClient {
    client: Client,
    base_url: String,
    account_region: String,
}

impl RiotClient {
    /// Create a new client with the given configuration and API key.
    pub fn new(config: &RiotConfig, api_key: &str) -> Result<Self, RiotError> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(api_key).map_err(|_| RiotError::InvalidApiKey)?;
        token.set_sensitive(true);
        headers.insert(HeaderName::from_static(RIOT_TOKEN_HEADER), token);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("tft-dash/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            account_region: config.account_region.clone(),
        })
    }

    /// Build an endpoint URL on a routing host. Segments are percent-encoded.
    fn endpoint(&self, host: &str, segments: &[&str]) -> Result<Url, RiotError> {
        let base = self.base_url.replace("{host}", host);
        let mut url =
            Url::parse(&base).map_err(|e| RiotError::InvalidUrl(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| RiotError::InvalidUrl(base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RiotError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RiotError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RiotApi for RiotClient {
    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, RiotError> {
        let url = self.endpoint(
            &self.account_region,
            &["riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line],
        )?;
        self.get_json(url).await
    }

    async fn summoner_by_puuid(
        &self,
        platform: &str,
        puuid: &str,
    ) -> Result<SummonerDto, RiotError> {
        let url = self.endpoint(
            platform,
            &["lol", "summoner", "v4", "summoners", "by-puuid", puuid],
        )?;
        self.get_json(url).await
    }

    async fn match_ids(
        &self,
        source: MatchSource,
        match_region: &str,
        puuid: &str,
        count: u32,
    ) -> Result<Vec<String>, RiotError> {
        let mut segments = source.base_segments().to_vec();
        segments.extend(["by-puuid", puuid, "ids"]);
        let mut url = self.endpoint(match_region, &segments)?;
        url.query_pairs_mut()
            .append_pair("count", &count.to_string());
        self.get_json(url).await
    }

    async fn match_detail(
        &self,
        source: MatchSource,
        match_region: &str,
        match_id: &str,
    ) -> Result<MatchDto, RiotError> {
        let mut segments = source.base_segments().to_vec();
        segments.push(match_id);
        let url = self.endpoint(match_region, &segments)?;
        self.get_json(url).await
    }
}
