use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::history::{MatchHistory, MatchQuery};
use crate::models::MatchRecord;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub riot_id: String,
    pub puuid: String,
    pub region: String,
    pub platform: String,
    pub match_region: String,
    pub matches: Vec<MatchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Recent TFT matches for a Riot ID.
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = MatchQuery::tft(match_count(&state, &form));
    run_search(&state, &form, query, "No recent TFT matches found.").await
}

/// Recent Arena matches for a Riot ID; other modes are left out.
pub async fn search_arena(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = MatchQuery::arena(match_count(&state, &form));
    run_search(&state, &form, query, "No recent Arena matches found.").await
}

fn match_count(state: &AppState, form: &SearchForm) -> u32 {
    form.count.unwrap_or(state.match_count)
}

async fn run_search(
    state: &AppState,
    form: &SearchForm,
    query: MatchQuery,
    empty_message: &str,
) -> Result<Json<SearchResponse>, ApiError> {
    let history = MatchHistory::new(state.riot.as_ref(), &state.catalog)
        .with_region_cache(state.region_cache.as_deref());

    let outcome = history
        .search(&form.game_name, &form.tag_line, query)
        .await?;

    let message = outcome
        .matches
        .is_empty()
        .then(|| empty_message.to_string());

    Ok(Json(SearchResponse {
        riot_id: outcome.riot_id,
        puuid: outcome.puuid,
        region: outcome.region.code,
        platform: outcome.region.platform,
        match_region: outcome.region.match_region,
        matches: outcome.matches,
        message,
    }))
}
