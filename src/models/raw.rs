//! Upstream payloads as returned by the Riot API.
//!
//! TFT match payloads use snake_case keys while League (Arena) payloads use
//! camelCase, so a single participant type carries both sets of fields with
//! defaults for whatever the other mode leaves out.

use serde::Deserialize;

/// Placement assumed for a participant whose payload carries none.
pub const UNRANKED_PLACEMENT: u32 = 9;

fn unranked() -> u32 {
    UNRANKED_PLACEMENT
}

/// Account lookup response (Riot ID → PUUID).
#[derive(Debug, Clone, Deserialize)]
pub struct AccountDto {
    pub puuid: String,
    #[serde(rename = "gameName", default)]
    pub game_name: Option<String>,
    #[serde(rename = "tagLine", default)]
    pub tag_line: Option<String>,
}

/// Summoner lookup response. Only used as a presence probe.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummonerDto {
    #[serde(default)]
    pub puuid: Option<String>,
}

/// Full match payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchDto {
    #[serde(default)]
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchInfo {
    /// League game mode, e.g. "CHERRY" for Arena
    #[serde(rename = "gameMode", default)]
    pub game_mode: Option<String>,

    /// TFT game type, e.g. "standard" or "pairs"
    #[serde(default)]
    pub tft_game_type: Option<String>,

    /// TFT start time in epoch milliseconds
    #[serde(default)]
    pub game_datetime: Option<i64>,

    /// League start time in epoch milliseconds
    #[serde(rename = "gameCreation", default)]
    pub game_creation: Option<i64>,

    #[serde(default)]
    pub participants: Vec<RawParticipant>,
}

/// One player's entry in a match payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawParticipant {
    #[serde(rename = "riotIdGameName", default)]
    pub riot_id_game_name: Option<String>,
    #[serde(rename = "riotIdTagline", default)]
    pub riot_id_tagline: Option<String>,

    #[serde(default = "unranked")]
    pub placement: u32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub gold_left: u32,
    #[serde(default)]
    pub last_round: u32,
    #[serde(default)]
    pub time_eliminated: f64,
    #[serde(default)]
    pub total_damage_to_players: u32,
    #[serde(default)]
    pub traits: Vec<RawTrait>,
    #[serde(default)]
    pub units: Vec<RawUnit>,
    #[serde(default)]
    pub augments: Vec<String>,
    #[serde(default)]
    pub partner_group_id: Option<u32>,

    // Arena fields
    #[serde(rename = "playerSubteamId", default)]
    pub player_subteam_id: Option<u32>,
    #[serde(rename = "championName", default)]
    pub champion_name: Option<String>,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(rename = "totalDamageDealtToChampions", default)]
    pub total_damage_dealt_to_champions: u64,
    #[serde(rename = "totalDamageTaken", default)]
    pub total_damage_taken: u64,
    #[serde(rename = "goldEarned", default)]
    pub gold_earned: u64,
    #[serde(rename = "playerAugment1", default)]
    pub player_augment_1: Option<u32>,
    #[serde(rename = "playerAugment2", default)]
    pub player_augment_2: Option<u32>,
    #[serde(rename = "playerAugment3", default)]
    pub player_augment_3: Option<u32>,
    #[serde(rename = "playerAugment4", default)]
    pub player_augment_4: Option<u32>,
    #[serde(rename = "playerAugment5", default)]
    pub player_augment_5: Option<u32>,
    #[serde(rename = "playerAugment6", default)]
    pub player_augment_6: Option<u32>,
}

impl RawParticipant {
    /// The six Arena augment slots in pick order.
    pub fn augment_slots(&self) -> [Option<u32>; 6] {
        [
            self.player_augment_1,
            self.player_augment_2,
            self.player_augment_3,
            self.player_augment_4,
            self.player_augment_5,
            self.player_augment_6,
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrait {
    pub name: String,
    #[serde(default)]
    pub tier_current: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUnit {
    pub character_id: String,
    #[serde(default)]
    pub tier: u32,
    #[serde(rename = "itemNames", default)]
    pub item_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tft_participant_parses() {
        let json = r#"{
            "riotIdGameName": "wybo",
            "riotIdTagline": "plstn",
            "placement": 3,
            "level": 8,
            "gold_left": 12,
            "last_round": 31,
            "time_eliminated": 1805.73,
            "total_damage_to_players": 104,
            "partner_group_id": 2,
            "augments": ["TFT_Augment_A"],
            "traits": [{"name": "TFT15_Bastion", "tier_current": 2, "tier_total": 3, "num_units": 4}],
            "units": [{"character_id": "TFT15_Garen", "tier": 2, "itemNames": ["TFT_Item_Warmogs"]}]
        }"#;

        let p: RawParticipant = serde_json::from_str(json).unwrap();
        assert_eq!(p.placement, 3);
        assert_eq!(p.partner_group_id, Some(2));
        assert_eq!(p.traits[0].tier_current, 2);
        assert_eq!(p.units[0].item_names, vec!["TFT_Item_Warmogs"]);
        assert!((p.time_eliminated - 1805.73).abs() < 1e-9);
        assert!(p.player_subteam_id.is_none());
    }

    #[test]
    fn test_arena_participant_parses() {
        let json = r#"{
            "riotIdGameName": "Arena",
            "riotIdTagline": "EUW",
            "placement": 1,
            "playerSubteamId": 4,
            "championName": "Sett",
            "kills": 12, "deaths": 3, "assists": 5,
            "totalDamageDealtToChampions": 45000,
            "totalDamageTaken": 30000,
            "goldEarned": 14000,
            "playerAugment1": 101,
            "playerAugment2": 0
        }"#;

        let p: RawParticipant = serde_json::from_str(json).unwrap();
        assert_eq!(p.player_subteam_id, Some(4));
        assert_eq!(p.champion_name.as_deref(), Some("Sett"));
        assert_eq!(p.augment_slots()[0], Some(101));
        assert_eq!(p.augment_slots()[1], Some(0));
        assert_eq!(p.augment_slots()[2], None);
        assert!(p.traits.is_empty());
    }

    #[test]
    fn test_missing_placement_is_unranked() {
        let p: RawParticipant = serde_json::from_str("{}").unwrap();
        assert_eq!(p.placement, UNRANKED_PLACEMENT);
    }

    #[test]
    fn test_match_without_info_defaults_empty() {
        let m: MatchDto = serde_json::from_str(r#"{"metadata": {"match_id": "NA1_1"}}"#).unwrap();
        assert!(m.info.participants.is_empty());
    }
}
