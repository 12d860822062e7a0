//! Grouped participants (duo partners or Arena sub-teams).

use serde::Serialize;

use super::PlayerRecord;

/// Arena sub-team names, indexed by `sub-team id - 1`.
pub const TEAM_NAMES: [&str; 8] = [
    "Poro", "Minion", "Scuttle", "Krug", "Raptor", "Sentinel", "Wolf", "Gromp",
];

/// Display name for an Arena sub-team id.
pub fn team_name(subteam_id: u32) -> String {
    subteam_id
        .checked_sub(1)
        .and_then(|i| TEAM_NAMES.get(i as usize))
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Unknown Team {}", subteam_id))
}

/// Display label for a duo partner group.
pub fn group_label(group_id: u32) -> String {
    format!("Group {}", group_id)
}

/// A team of players with the best placement among them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRecord {
    pub label: String,
    pub group_id: u32,
    /// Minimum placement of the members added so far
    pub placement: u32,
    pub players: Vec<PlayerRecord>,
}

impl TeamRecord {
    /// Start a team whose placement is seeded from its first member.
    pub fn new(label: String, group_id: u32, first: PlayerRecord) -> Self {
        Self {
            label,
            group_id,
            placement: first.placement,
            players: vec![first],
        }
    }

    /// Add a member, keeping the team placement at the running minimum.
    pub fn push(&mut self, player: PlayerRecord) {
        self.placement = self.placement.min(player.placement);
        self.players.push(player);
    }
}
