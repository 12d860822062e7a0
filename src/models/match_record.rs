//! Match-level records and game-mode classification.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchInfo, PlayerRecord, TeamRecord};

/// League game mode tag for Arena.
pub const ARENA_GAME_MODE: &str = "CHERRY";

/// How a match's participants are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Free-for-all, one record per player
    #[default]
    Standard,
    /// Double Up, grouped by partner group id
    Pairs,
    /// Arena (CHERRY), grouped by sub-team id
    Arena,
}

impl GameMode {
    /// Classify a match from its payload. Anything unrecognized is standard.
    pub fn classify(info: &MatchInfo) -> Self {
        if info.game_mode.as_deref() == Some(ARENA_GAME_MODE) {
            return GameMode::Arena;
        }
        match info.tft_game_type.as_deref() {
            Some("pairs") | Some("duo") => GameMode::Pairs,
            _ => GameMode::Standard,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Standard => write!(f, "standard"),
            GameMode::Pairs => write!(f, "pairs"),
            GameMode::Arena => write!(f, "arena"),
        }
    }
}

/// Participants of one match, either flat or grouped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchParticipants {
    Players(Vec<PlayerRecord>),
    Teams(Vec<TeamRecord>),
}

impl MatchParticipants {
    /// Number of players, across all teams.
    pub fn player_count(&self) -> usize {
        match self {
            MatchParticipants::Players(players) => players.len(),
            MatchParticipants::Teams(teams) => teams.iter().map(|t| t.players.len()).sum(),
        }
    }
}

/// A fetched and normalized match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub match_id: String,
    pub game_mode: GameMode,
    pub started_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub participants: MatchParticipants,
}

impl MatchRecord {
    pub fn new(match_id: String, game_mode: GameMode, participants: MatchParticipants) -> Self {
        Self {
            match_id,
            game_mode,
            started_at: None,
            participants,
        }
    }

    /// Set the start time from epoch milliseconds.
    pub fn with_started_at_millis(mut self, millis: Option<i64>) -> Self {
        self.started_at = millis.and_then(DateTime::from_timestamp_millis);
        self
    }
}

/// Plain-text summary, one block per player.
impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} players)",
            self.match_id,
            self.game_mode,
            self.participants.player_count()
        )?;
        if let Some(started_at) = self.started_at {
            write!(f, " {}", started_at.format("%Y-%m-%d %H:%M UTC"))?;
        }
        writeln!(f)?;

        match &self.participants {
            MatchParticipants::Players(players) => {
                for player in players {
                    write_player(f, player, "  ")?;
                }
            }
            MatchParticipants::Teams(teams) => {
                for team in teams {
                    writeln!(f, "  {} (#{})", team.label, team.placement)?;
                    for player in &team.players {
                        write_player(f, player, "    ")?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn write_player(f: &mut fmt::Formatter<'_>, p: &PlayerRecord, indent: &str) -> fmt::Result {
    writeln!(
        f,
        "{}#{} {} | Level {} | Gold {} | Round {} | Damage {}",
        indent,
        p.placement,
        p.summoner_name,
        p.level,
        p.gold_left,
        p.last_round,
        p.total_damage_to_players
    )?;
    writeln!(f, "{}  Traits: {}", indent, p.traits_display())?;
    writeln!(f, "{}  Units: {}", indent, p.units_display())?;
    writeln!(f, "{}  Augments: {}", indent, p.augments_display())?;
    if let Some(combat) = &p.combat {
        writeln!(
            f,
            "{}  {} {} | KDA {} | KP {:.1}% | Damage {} / taken {} | Gold {}",
            indent,
            combat.champion,
            combat.kda,
            combat.kda_ratio,
            combat.kill_participation,
            combat.total_damage,
            combat.total_damage_taken,
            combat.gold_earned
        )?;
    }
    Ok(())
}
