//! Team (unordered pair of players) and the normalized pair used as its identity.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Two distinct players in canonical (sorted) order.
///
/// `PlayerPair::new(a, b) == PlayerPair::new(b, a)`, which makes it usable as a
/// unique key for "one team per unordered pair".
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct PlayerPair {
    first: PlayerId,
    second: PlayerId,
}

impl PlayerPair {
    /// Normalize two player ids. Returns `None` when both ids are the same player.
    pub fn new(a: PlayerId, b: PlayerId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> PlayerId {
        self.first
    }

    pub fn second(&self) -> PlayerId {
        self.second
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.first == player || self.second == player
    }

    /// True when the two pairs have a player in common.
    pub fn overlaps(&self, other: &PlayerPair) -> bool {
        other.contains(self.first) || other.contains(self.second)
    }

    pub fn members(&self) -> [PlayerId; 2] {
        [self.first, self.second]
    }
}

/// A doubles team. Immutable once created; shared by every match it plays in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: PlayerPair,
}

impl Team {
    /// New team for a normalized pair. The name is derived from both ids so a
    /// team row can be traced back to its players without a join.
    pub fn new(players: PlayerPair) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: team_name(&players),
            players,
        }
    }
}

/// Link row between a team and one of its two players.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub team_id: TeamId,
    pub player_id: PlayerId,
}

fn team_name(players: &PlayerPair) -> String {
    let short = |id: PlayerId| id.simple().to_string()[..8].to_string();
    format!("team-{}-{}", short(players.first()), short(players.second()))
}
