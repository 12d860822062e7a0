//! Normalized per-player records.

use std::fmt;

use serde::Serialize;

/// Shown in place of an empty item list.
pub const NO_ITEMS: &str = "No items";

/// An active trait on a player's board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitSummary {
    /// Upstream trait id (e.g. "TFT15_Bastion")
    pub name: String,
    /// Catalog display name, if known
    pub display_name: Option<String>,
    pub tier: u32,
}

impl fmt::Display for TraitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.display_name.as_deref().unwrap_or(&self.name);
        write!(f, "{} (Tier {})", name, self.tier)
    }
}

/// A unit deployed on a player's board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSummary {
    pub character_id: String,
    pub display_name: Option<String>,
    pub cost: Option<u8>,
    pub star_tier: u32,
    pub items: Vec<String>,
}

impl UnitSummary {
    pub fn items_display(&self) -> String {
        if self.items.is_empty() {
            NO_ITEMS.to_string()
        } else {
            self.items.join(", ")
        }
    }
}

impl fmt::Display for UnitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.display_name.as_deref().unwrap_or(&self.character_id);
        write!(f, "{} ★{} [{}]", name, self.star_tier, self.items_display())
    }
}

/// League-style combat stats, only present for Arena matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatStats {
    pub champion: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// "kills/deaths/assists"
    pub kda: String,
    /// Percentage in 0..=100
    pub kill_participation: f64,
    /// (kills + assists) / (deaths + 1), two decimals
    pub kda_ratio: String,
    pub total_damage: u64,
    pub total_damage_taken: u64,
    pub gold_earned: u64,
}

/// A single participant after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    /// "name#tag"
    pub summoner_name: String,
    pub placement: u32,
    pub level: u32,
    pub gold_left: u32,
    pub last_round: u32,
    /// Seconds, truncated toward zero
    pub time_eliminated: i64,
    pub total_damage_to_players: u32,
    pub traits: Vec<TraitSummary>,
    pub units: Vec<UnitSummary>,
    pub augments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combat: Option<CombatStats>,
}

impl PlayerRecord {
    pub fn traits_display(&self) -> String {
        join_or_none(&self.traits, ", ")
    }

    pub fn units_display(&self) -> String {
        join_or_none(&self.units, "; ")
    }

    pub fn augments_display(&self) -> String {
        join_or_none(&self.augments, ", ")
    }
}

fn join_or_none<T: fmt::Display>(items: &[T], sep: &str) -> String {
    if items.is_empty() {
        return "None".to_string();
    }
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(items: &[&str]) -> UnitSummary {
        UnitSummary {
            character_id: "TFT15_Garen".to_string(),
            display_name: Some("Garen".to_string()),
            cost: Some(1),
            star_tier: 2,
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_unit_display_without_items() {
        assert_eq!(unit(&[]).to_string(), "Garen ★2 [No items]");
    }

    #[test]
    fn test_unit_display_falls_back_to_character_id() {
        let unknown = UnitSummary {
            character_id: "TFT15_Mystery".to_string(),
            display_name: None,
            cost: None,
            ..unit(&["TFT_Item_Warmogs"])
        };
        assert_eq!(unknown.to_string(), "TFT15_Mystery ★2 [TFT_Item_Warmogs]");
    }

    #[test]
    fn test_unit_display_with_items() {
        assert_eq!(
            unit(&["Warmog's Armor", "Sunfire Cape"]).to_string(),
            "Garen ★2 [Warmog's Armor, Sunfire Cape]"
        );
    }

    #[test]
    fn test_trait_display_prefers_display_name() {
        let t = TraitSummary {
            name: "TFT15_Bastion".to_string(),
            display_name: Some("Bastion".to_string()),
            tier: 2,
        };
        assert_eq!(t.to_string(), "Bastion (Tier 2)");

        let raw = TraitSummary {
            display_name: None,
            ..t
        };
        assert_eq!(raw.to_string(), "TFT15_Bastion (Tier 2)");
    }

    #[test]
    fn test_empty_lists_display_none() {
        let record = PlayerRecord {
            summoner_name: "Unknown#0000".to_string(),
            placement: 1,
            level: 1,
            gold_left: 0,
            last_round: 1,
            time_eliminated: 0,
            total_damage_to_players: 0,
            traits: vec![],
            units: vec![unit(&[]), unit(&["Bloodthirster"])],
            augments: vec![],
            combat: None,
        };

        assert_eq!(record.traits_display(), "None");
        assert_eq!(record.augments_display(), "None");
        assert_eq!(
            record.units_display(),
            "Garen ★2 [No items]; Garen ★2 [Bloodthirster]"
        );
    }

    #[test]
    fn test_combat_skipped_when_absent() {
        let record = PlayerRecord {
            summoner_name: "a#b".to_string(),
            placement: 1,
            level: 9,
            gold_left: 3,
            last_round: 30,
            time_eliminated: 1700,
            total_damage_to_players: 150,
            traits: vec![],
            units: vec![],
            augments: vec![],
            combat: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("combat").is_none());
        assert_eq!(json["time_eliminated"], 1700);
    }
}
