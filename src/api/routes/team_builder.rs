use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::team_code::{bravery, encode_team, BraveryOptions};

#[derive(Debug, Serialize)]
pub struct CostGroup {
    pub cost: u8,
    pub units: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UnitsResponse {
    pub cost_groups: Vec<CostGroup>,
}

/// The unit catalog, grouped by cost with names sorted.
pub async fn list_units(State(state): State<AppState>) -> Json<UnitsResponse> {
    let cost_groups = state
        .catalog
        .units_by_cost()
        .into_iter()
        .map(|(cost, units)| CostGroup { cost, units })
        .collect();

    Json(UnitsResponse { cost_groups })
}

#[derive(Debug, Deserialize)]
pub struct GenerateCodeRequest {
    #[serde(default)]
    pub units: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TeamCodeResponse {
    pub team_code: String,
}

pub async fn generate_code(
    State(state): State<AppState>,
    Json(request): Json<GenerateCodeRequest>,
) -> Json<TeamCodeResponse> {
    Json(TeamCodeResponse {
        team_code: encode_team(&state.catalog, &request.units),
    })
}

#[derive(Debug, Serialize)]
pub struct BraveryResponse {
    pub units: Vec<String>,
    pub team_code: String,
}

/// A random composition and its code. An absent body uses the defaults.
pub async fn bravery_pick(
    State(state): State<AppState>,
    options: Option<Json<BraveryOptions>>,
) -> Json<BraveryResponse> {
    let options = options.map(|Json(o)| o).unwrap_or_default();
    let units = bravery(&state.catalog, options, &mut rand::thread_rng());
    let team_code = encode_team(&state.catalog, &units);

    Json(BraveryResponse { units, team_code })
}
