//! Static game data: regions, units and traits.
//!
//! Loaded once at startup from JSON files in the data directory and shared
//! read-only for the life of the process:
//! - `regions.json`: ordered list of platform/match routing pairs
//! - `units.json`: display name → code id, cost and API name
//! - `traits.json`: API trait id → display name

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid catalog entry: {0}")]
    Invalid(String),
}

/// A platform/match routing pair for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    /// Short code, e.g. "NA"
    pub code: String,
    /// Platform routing value for summoner lookups, e.g. "na1"
    pub platform: String,
    /// Match routing value for match history, e.g. "americas"
    pub match_region: String,
}

/// A unit in the team builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitEntry {
    /// Three-character code used in team codes
    pub id: String,
    /// Shop cost tier, 1-5
    pub cost: u8,
    /// Character id as it appears in match payloads
    #[serde(default)]
    pub api_name: Option<String>,
}

/// Read-only game data shared by every request.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    regions: Vec<RegionEntry>,
    units: BTreeMap<String, UnitEntry>,
    traits: HashMap<String, String>,
    units_by_api_name: HashMap<String, String>,
}

impl Catalog {
    /// Build a catalog from already-parsed parts.
    pub fn from_parts(
        regions: Vec<RegionEntry>,
        units: BTreeMap<String, UnitEntry>,
        traits: HashMap<String, String>,
    ) -> Result<Self, CatalogError> {
        for (name, unit) in &units {
            if unit.id.len() != 3 || !unit.id.is_ascii() {
                return Err(CatalogError::Invalid(format!(
                    "unit {} has code {:?}, expected 3 characters",
                    name, unit.id
                )));
            }
            if !(1..=5).contains(&unit.cost) {
                return Err(CatalogError::Invalid(format!(
                    "unit {} has cost {}, expected 1-5",
                    name, unit.cost
                )));
            }
        }

        let units_by_api_name = units
            .iter()
            .filter_map(|(name, unit)| unit.api_name.clone().map(|api| (api, name.clone())))
            .collect();

        Ok(Self {
            regions,
            units,
            traits,
            units_by_api_name,
        })
    }

    /// Load `regions.json`, `units.json` and `traits.json` from a directory.
    /// A missing traits file yields an empty trait table.
    pub fn load(data_dir: &Path) -> Result<Self, CatalogError> {
        let regions: Vec<RegionEntry> = read_json(&data_dir.join("regions.json"))?;
        let units: BTreeMap<String, UnitEntry> = read_json(&data_dir.join("units.json"))?;

        let traits_path = data_dir.join("traits.json");
        let traits: HashMap<String, String> = if traits_path.exists() {
            read_json(&traits_path)?
        } else {
            HashMap::new()
        };

        info!(
            "Loaded catalog: {} regions, {} units, {} traits",
            regions.len(),
            units.len(),
            traits.len()
        );

        Self::from_parts(regions, units, traits)
    }

    /// Regions in probe order.
    pub fn regions(&self) -> &[RegionEntry] {
        &self.regions
    }

    pub fn unit(&self, name: &str) -> Option<&UnitEntry> {
        self.units.get(name)
    }

    /// Find a unit by its match-payload character id.
    pub fn unit_by_api_name(&self, api_name: &str) -> Option<(&str, &UnitEntry)> {
        let name = self.units_by_api_name.get(api_name)?;
        self.units
            .get_key_value(name)
            .map(|(name, unit)| (name.as_str(), unit))
    }

    pub fn trait_name(&self, api_name: &str) -> Option<&str> {
        self.traits.get(api_name).map(String::as_str)
    }

    /// All unit names, sorted.
    pub fn unit_names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// Unit names grouped by cost, each group sorted alphabetically.
    pub fn units_by_cost(&self) -> BTreeMap<u8, Vec<String>> {
        let mut groups: BTreeMap<u8, Vec<String>> = BTreeMap::new();
        // BTreeMap iteration is already name-ordered
        for (name, unit) in &self.units {
            groups.entry(unit.cost).or_default().push(name.clone());
        }
        groups
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}
