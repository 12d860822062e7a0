//! Team-builder codes and random ("bravery") compositions.
//!
//! A team code is `02` followed by ten three-character unit codes and the
//! set suffix. Empty slots are `000`.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

pub const MAX_UNITS: usize = 10;
pub const CODE_PREFIX: &str = "02";
pub const CODE_SUFFIX: &str = "TFTSet15";
pub const EMPTY_SLOT: &str = "000";

/// Encode up to ten unit names into a team code.
///
/// Names past the tenth are ignored. Names missing from the catalog are
/// dropped without error, so the code may hold fewer units than requested.
pub fn encode_team<S: AsRef<str>>(catalog: &Catalog, names: &[S]) -> String {
    let mut codes: Vec<&str> = names
        .iter()
        .take(MAX_UNITS)
        .filter_map(|name| catalog.unit(name.as_ref()))
        .map(|unit| unit.id.as_str())
        .collect();

    codes.resize(MAX_UNITS, EMPTY_SLOT);

    let mut code = String::with_capacity(CODE_PREFIX.len() + MAX_UNITS * 3 + CODE_SUFFIX.len());
    code.push_str(CODE_PREFIX);
    for c in codes {
        code.push_str(c);
    }
    code.push_str(CODE_SUFFIX);
    code
}

/// Units drawn per cost tier (1-5) for a weighted pick of a given size.
const WEIGHTED_PLAN: [(usize, [usize; 5]); 5] = [
    (6, [2, 2, 1, 1, 0]),
    (7, [2, 2, 2, 1, 0]),
    (8, [2, 2, 2, 1, 1]),
    (9, [2, 2, 2, 2, 1]),
    (10, [2, 2, 2, 2, 2]),
];

/// Options for a random composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BraveryOptions {
    #[serde(default = "default_min")]
    pub min: usize,
    #[serde(default = "default_max")]
    pub max: usize,
    /// Follow the per-cost distribution instead of a uniform draw
    #[serde(default)]
    pub weighted: bool,
}

fn default_min() -> usize {
    1
}

fn default_max() -> usize {
    MAX_UNITS
}

impl Default for BraveryOptions {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            weighted: false,
        }
    }
}

impl BraveryOptions {
    /// Clamp to 1..=10 and collapse an inverted range onto `max`.
    pub fn clamped(self) -> Self {
        let max = self.max.min(MAX_UNITS);
        let min = self.min.max(1).min(max);
        Self { min, max, ..self }
    }
}

/// Pick a random composition.
///
/// The size is drawn uniformly from the clamped range. Weighted picks use the
/// per-cost plan for that size; sizes without a plan yield no units.
pub fn bravery<R: Rng + ?Sized>(
    catalog: &Catalog,
    options: BraveryOptions,
    rng: &mut R,
) -> Vec<String> {
    let options = options.clamped();
    if options.max == 0 {
        return Vec::new();
    }
    let count = rng.gen_range(options.min..=options.max);

    if !options.weighted {
        let names: Vec<&str> = catalog.unit_names().collect();
        return names
            .choose_multiple(rng, count)
            .map(|s| s.to_string())
            .collect();
    }

    let Some((_, plan)) = WEIGHTED_PLAN.iter().find(|(size, _)| *size == count) else {
        return Vec::new();
    };

    let by_cost = catalog.units_by_cost();
    let mut picked = Vec::with_capacity(count);
    for (tier, picks) in plan.iter().enumerate() {
        let cost = tier as u8 + 1;
        if let Some(pool) = by_cost.get(&cost) {
            picked.extend(pool.choose_multiple(rng, *picks).cloned());
        }
    }
    picked
}
