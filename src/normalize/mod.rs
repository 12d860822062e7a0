//! Participant normalization.
//!
//! Turns the raw participant list of a match into a placement-ordered
//! structure:
//! - standard matches: a flat list of players sorted by placement
//! - pairs: players grouped by partner group id
//! - Arena: players grouped by sub-team id, labelled with the fixed team names
//!
//! Group placement is the running minimum of its members' placements. Groups
//! are collected in discovery order and sorted once, after every participant
//! has been added. All sorts are stable, so equal placements keep input order.

use tracing::debug;

use crate::catalog::Catalog;
use crate::models::{
    group_label, team_name, CombatStats, GameMode, MatchParticipants, PlayerRecord,
    RawParticipant, TeamRecord, TraitSummary, UnitSummary,
};

const UNKNOWN_GAME_NAME: &str = "Unknown";
const UNKNOWN_TAG_LINE: &str = "0000";

/// Kill participation as a percentage; 0 when there were no takedowns at all.
pub fn kill_participation(kills: u32, deaths: u32, assists: u32) -> f64 {
    let total = kills as u64 + deaths as u64 + assists as u64;
    if total == 0 {
        return 0.0;
    }
    (kills as u64 + assists as u64) as f64 / total as f64 * 100.0
}

/// (kills + assists) / (deaths + 1), two decimals.
pub fn kda_ratio(kills: u32, deaths: u32, assists: u32) -> String {
    let ratio = (kills as u64 + assists as u64) as f64 / (deaths as u64 + 1) as f64;
    format!("{:.2}", ratio)
}

/// Converts raw participants into display-ready records.
pub struct Normalizer<'a> {
    catalog: &'a Catalog,
}

impl<'a> Normalizer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Normalize one match's participants according to its mode.
    pub fn normalize(&self, participants: &[RawParticipant], mode: GameMode) -> MatchParticipants {
        match mode {
            GameMode::Standard => MatchParticipants::Players(self.solo(participants, mode)),
            GameMode::Pairs => MatchParticipants::Teams(self.grouped(
                participants,
                mode,
                |p| p.partner_group_id.unwrap_or(0),
                group_label,
            )),
            GameMode::Arena => MatchParticipants::Teams(self.grouped(
                participants,
                mode,
                |p| p.player_subteam_id.unwrap_or(0),
                team_name,
            )),
        }
    }

    fn solo(&self, participants: &[RawParticipant], mode: GameMode) -> Vec<PlayerRecord> {
        let mut players: Vec<PlayerRecord> = participants
            .iter()
            .map(|p| self.format_player(p, mode))
            .collect();
        players.sort_by_key(|p| p.placement);
        players
    }

    fn grouped(
        &self,
        participants: &[RawParticipant],
        mode: GameMode,
        group_of: impl Fn(&RawParticipant) -> u32,
        label_of: impl Fn(u32) -> String,
    ) -> Vec<TeamRecord> {
        let mut teams: Vec<TeamRecord> = Vec::new();

        for participant in participants {
            let group_id = group_of(participant);
            let player = self.format_player(participant, mode);
            match teams.iter_mut().find(|t| t.group_id == group_id) {
                Some(team) => team.push(player),
                None => teams.push(TeamRecord::new(label_of(group_id), group_id, player)),
            }
        }

        teams.sort_by_key(|t| t.placement);
        debug!("Grouped {} participants into {} teams", participants.len(), teams.len());
        teams
    }

    /// Extract and clean one participant's fields.
    pub fn format_player(&self, p: &RawParticipant, mode: GameMode) -> PlayerRecord {
        let traits = p
            .traits
            .iter()
            .filter(|t| t.tier_current > 0)
            .map(|t| TraitSummary {
                name: t.name.clone(),
                display_name: self.catalog.trait_name(&t.name).map(String::from),
                tier: t.tier_current,
            })
            .collect();

        let units = p
            .units
            .iter()
            .map(|u| {
                let known = self.catalog.unit_by_api_name(&u.character_id);
                UnitSummary {
                    character_id: u.character_id.clone(),
                    display_name: known.map(|(name, _)| name.to_string()),
                    cost: known.map(|(_, unit)| unit.cost),
                    star_tier: u.tier,
                    items: u.item_names.clone(),
                }
            })
            .collect();

        let (augments, combat) = if mode == GameMode::Arena {
            let augments: Vec<String> = p
                .augment_slots()
                .iter()
                .flatten()
                .filter(|id| **id != 0)
                .map(|id| id.to_string())
                .collect();
            (augments, Some(combat_stats(p)))
        } else {
            let augments: Vec<String> = p
                .augments
                .iter()
                .filter(|a| !a.is_empty())
                .cloned()
                .collect();
            (augments, None)
        };

        PlayerRecord {
            summoner_name: summoner_name(p),
            placement: p.placement,
            level: p.level,
            gold_left: p.gold_left,
            last_round: p.last_round,
            time_eliminated: p.time_eliminated.trunc() as i64,
            total_damage_to_players: p.total_damage_to_players,
            traits,
            units,
            augments,
            combat,
        }
    }
}

fn summoner_name(p: &RawParticipant) -> String {
    let game_name = non_empty(p.riot_id_game_name.as_deref()).unwrap_or(UNKNOWN_GAME_NAME);
    let tag_line = non_empty(p.riot_id_tagline.as_deref()).unwrap_or(UNKNOWN_TAG_LINE);
    format!("{}#{}", game_name, tag_line)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

fn combat_stats(p: &RawParticipant) -> CombatStats {
    CombatStats {
        champion: p
            .champion_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_GAME_NAME.to_string()),
        kills: p.kills,
        deaths: p.deaths,
        assists: p.assists,
        kda: format!("{}/{}/{}", p.kills, p.deaths, p.assists),
        kill_participation: kill_participation(p.kills, p.deaths, p.assists),
        kda_ratio: kda_ratio(p.kills, p.deaths, p.assists),
        total_damage: p.total_damage_dealt_to_champions,
        total_damage_taken: p.total_damage_taken,
        gold_earned: p.gold_earned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::test_catalog;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn participant(value: serde_json::Value) -> RawParticipant {
        serde_json::from_value(value).unwrap()
    }

    fn tft(name: &str, placement: u32) -> RawParticipant {
        participant(json!({
            "riotIdGameName": name,
            "riotIdTagline": "NA1",
            "placement": placement,
            "level": 8,
            "gold_left": 2,
            "last_round": 30,
            "time_eliminated": 1500.5,
            "total_damage_to_players": 90
        }))
    }

    fn paired(name: &str, placement: u32, group: u32) -> RawParticipant {
        let mut p = tft(name, placement);
        p.partner_group_id = Some(group);
        p
    }

    fn arena(name: &str, placement: u32, subteam: u32) -> RawParticipant {
        participant(json!({
            "riotIdGameName": name,
            "riotIdTagline": "EUW",
            "placement": placement,
            "playerSubteamId": subteam,
            "championName": "Sett",
            "kills": 4, "deaths": 2, "assists": 6
        }))
    }

    fn players(result: MatchParticipants) -> Vec<PlayerRecord> {
        match result {
            MatchParticipants::Players(p) => p,
            MatchParticipants::Teams(_) => panic!("expected players"),
        }
    }

    fn teams(result: MatchParticipants) -> Vec<TeamRecord> {
        match result {
            MatchParticipants::Teams(t) => t,
            MatchParticipants::Players(_) => panic!("expected teams"),
        }
    }

    #[test]
    fn test_solo_sorted_by_placement() {
        let catalog = test_catalog();
        let input = vec![tft("c", 3), tft("a", 1), tft("h", 8), tft("b", 2)];

        let out = players(Normalizer::new(&catalog).normalize(&input, GameMode::Standard));

        assert_eq!(out.len(), input.len());
        let placements: Vec<u32> = out.iter().map(|p| p.placement).collect();
        assert_eq!(placements, vec![1, 2, 3, 8]);
        assert_eq!(out[0].summoner_name, "a#NA1");
    }

    #[test]
    fn test_solo_ties_keep_input_order() {
        let catalog = test_catalog();
        let input = vec![tft("first", 4), tft("top", 1), tft("second", 4), tft("third", 4)];

        let out = players(Normalizer::new(&catalog).normalize(&input, GameMode::Standard));

        let names: Vec<&str> = out.iter().map(|p| p.summoner_name.as_str()).collect();
        assert_eq!(names, vec!["top#NA1", "first#NA1", "second#NA1", "third#NA1"]);
    }

    #[test]
    fn test_solo_empty_input() {
        let catalog = test_catalog();
        let out = players(Normalizer::new(&catalog).normalize(&[], GameMode::Standard));
        assert!(out.is_empty());
    }

    #[test]
    fn test_pairs_grouped_by_partner() {
        let catalog = test_catalog();
        let input = vec![
            paired("a", 6, 1),
            paired("b", 2, 2),
            paired("c", 5, 1),
            paired("d", 3, 2),
            paired("e", 8, 3),
            paired("f", 1, 3),
        ];

        let out = teams(Normalizer::new(&catalog).normalize(&input, GameMode::Pairs));

        let summary: Vec<(String, u32, usize)> = out
            .iter()
            .map(|t| (t.label.clone(), t.placement, t.players.len()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Group 3".to_string(), 1, 2),
                ("Group 2".to_string(), 2, 2),
                ("Group 1".to_string(), 5, 2),
            ]
        );
        // Members stay in input order within a group
        assert_eq!(out[0].players[0].summoner_name, "e#NA1");
    }

    #[test]
    fn test_group_placement_is_member_minimum() {
        let catalog = test_catalog();
        let input = vec![paired("a", 7, 9), paired("b", 4, 9), paired("c", 6, 9)];

        let out = teams(Normalizer::new(&catalog).normalize(&input, GameMode::Pairs));

        assert_eq!(out.len(), 1);
        let min = out[0].players.iter().map(|p| p.placement).min().unwrap();
        assert_eq!(out[0].placement, min);
        assert_eq!(out[0].placement, 4);
    }

    #[test]
    fn test_group_ties_keep_discovery_order() {
        let catalog = test_catalog();
        let input = vec![paired("x", 3, 5), paired("y", 3, 2), paired("z", 1, 7)];

        let out = teams(Normalizer::new(&catalog).normalize(&input, GameMode::Pairs));

        let ids: Vec<u32> = out.iter().map(|t| t.group_id).collect();
        assert_eq!(ids, vec![7, 5, 2]);
    }

    #[test]
    fn test_arena_teams_named_and_sorted() {
        let catalog = test_catalog();
        let input = vec![
            arena("a", 3, 1),
            arena("b", 3, 1),
            arena("c", 1, 8),
            arena("d", 1, 8),
            arena("e", 2, 12),
        ];

        let out = teams(Normalizer::new(&catalog).normalize(&input, GameMode::Arena));

        let labels: Vec<&str> = out.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Gromp", "Unknown Team 12", "Poro"]);
        assert!(out.iter().all(|t| t
            .players
            .iter()
            .all(|p| p.combat.is_some())));
    }

    #[test]
    fn test_arena_missing_subteam_is_unknown_zero() {
        let catalog = test_catalog();
        let mut p = arena("solo", 4, 1);
        p.player_subteam_id = None;

        let out = teams(Normalizer::new(&catalog).normalize(&[p], GameMode::Arena));
        assert_eq!(out[0].label, "Unknown Team 0");
    }

    #[test]
    fn test_elimination_time_truncates() {
        let catalog = test_catalog();
        let normalizer = Normalizer::new(&catalog);

        let mut p = tft("a", 1);
        p.time_eliminated = 125.9;
        assert_eq!(normalizer.format_player(&p, GameMode::Standard).time_eliminated, 125);

        p.time_eliminated = 125.1;
        assert_eq!(normalizer.format_player(&p, GameMode::Standard).time_eliminated, 125);

        p.time_eliminated = -3.7;
        assert_eq!(normalizer.format_player(&p, GameMode::Standard).time_eliminated, -3);
    }

    #[test]
    fn test_traits_filtered_by_tier() {
        let catalog = test_catalog();
        let p = participant(json!({
            "placement": 2,
            "traits": [
                {"name": "TFT15_Bastion", "tier_current": 0},
                {"name": "TFT15_Duelist", "tier_current": 2},
                {"name": "TFT15_Mystery", "tier_current": 1}
            ]
        }));

        let record = Normalizer::new(&catalog).format_player(&p, GameMode::Standard);

        assert_eq!(
            record.traits,
            vec![
                TraitSummary {
                    name: "TFT15_Duelist".to_string(),
                    display_name: Some("Duelist".to_string()),
                    tier: 2,
                },
                TraitSummary {
                    name: "TFT15_Mystery".to_string(),
                    display_name: None,
                    tier: 1,
                },
            ]
        );
        assert_eq!(record.traits_display(), "Duelist (Tier 2), TFT15_Mystery (Tier 1)");
    }

    #[test]
    fn test_units_and_items() {
        let catalog = test_catalog();
        let p = participant(json!({
            "placement": 1,
            "units": [
                {"character_id": "TFT15_Jinx", "tier": 3, "itemNames": ["TFT_Item_InfinityEdge", "TFT_Item_GuinsoosRageblade"]},
                {"character_id": "TFT15_Unlisted", "tier": 1}
            ]
        }));

        let record = Normalizer::new(&catalog).format_player(&p, GameMode::Standard);

        assert_eq!(record.units.len(), 2);
        assert_eq!(record.units[0].display_name.as_deref(), Some("Jinx"));
        assert_eq!(record.units[0].cost, Some(4));
        assert_eq!(record.units[1].display_name, None);
        assert_eq!(
            record.units_display(),
            "TFT15_Jinx ★3 [TFT_Item_InfinityEdge, TFT_Item_GuinsoosRageblade]; TFT15_Unlisted ★1 [No items]"
        );
    }

    #[test]
    fn test_name_fallbacks() {
        let catalog = test_catalog();
        let normalizer = Normalizer::new(&catalog);

        let anonymous = participant(json!({"placement": 1}));
        assert_eq!(
            normalizer.format_player(&anonymous, GameMode::Standard).summoner_name,
            "Unknown#0000"
        );

        let tagless = participant(json!({"placement": 1, "riotIdGameName": "wybo"}));
        assert_eq!(
            normalizer.format_player(&tagless, GameMode::Standard).summoner_name,
            "wybo#0000"
        );
    }

    #[test]
    fn test_tft_augments_kept_without_combat() {
        let catalog = test_catalog();
        let p = participant(json!({
            "placement": 1,
            "augments": ["TFT_Augment_Cluttered", "", "TFT_Augment_Level"]
        }));

        let record = Normalizer::new(&catalog).format_player(&p, GameMode::Standard);

        assert_eq!(record.augments, vec!["TFT_Augment_Cluttered", "TFT_Augment_Level"]);
        assert!(record.combat.is_none());
    }

    #[test]
    fn test_arena_combat_stats() {
        let catalog = test_catalog();
        let p = participant(json!({
            "riotIdGameName": "arena",
            "riotIdTagline": "EUW",
            "placement": 1,
            "playerSubteamId": 2,
            "championName": "Sett",
            "kills": 12, "deaths": 3, "assists": 5,
            "totalDamageDealtToChampions": 45000,
            "totalDamageTaken": 30000,
            "goldEarned": 14000,
            "playerAugment1": 101,
            "playerAugment2": 0,
            "playerAugment4": 77
        }));

        let record = Normalizer::new(&catalog).format_player(&p, GameMode::Arena);
        let combat = record.combat.clone().unwrap();

        assert_eq!(combat.champion, "Sett");
        assert_eq!(combat.kda, "12/3/5");
        assert_eq!(combat.kda_ratio, "4.25");
        assert!((combat.kill_participation - 17.0 / 20.0 * 100.0).abs() < 1e-9);
        assert_eq!(combat.total_damage, 45000);
        assert_eq!(combat.gold_earned, 14000);
        assert_eq!(record.augments, vec!["101", "77"]);
        assert_eq!(record.augments_display(), "101, 77");
    }

    #[test]
    fn test_kill_participation_zero_denominator() {
        assert_eq!(kill_participation(0, 0, 0), 0.0);
    }

    #[test]
    fn test_kill_participation_formula() {
        assert_eq!(kill_participation(3, 0, 1), 100.0);
        assert_eq!(kill_participation(1, 2, 1), 50.0);
        assert_eq!(kill_participation(0, 5, 0), 0.0);
    }

    #[test]
    fn test_kda_ratio_plus_one() {
        assert_eq!(kda_ratio(0, 0, 0), "0.00");
        assert_eq!(kda_ratio(5, 0, 3), "8.00");
        assert_eq!(kda_ratio(2, 2, 0), "0.67");
    }
}
