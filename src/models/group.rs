//! Group, its membership rows, and per-player ranking rows.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// Round number given to every generated group. Only one group round exists.
pub const GROUP_ROUND: u32 = 1;

/// A group of a tournament. Members live in separate `GroupMember` rows.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub round: u32,
}

impl Group {
    pub fn new(tournament_id: TournamentId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            name: name.into(),
            round: GROUP_ROUND,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: Uuid,
    pub group_id: GroupId,
    pub player_id: PlayerId,
}

impl GroupMember {
    pub fn new(group_id: GroupId, player_id: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            player_id,
        }
    }
}

/// A group together with its member ids (API / display view).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupWithMembers {
    #[serde(flatten)]
    pub group: Group,
    pub players: Vec<PlayerId>,
}

/// Standing of one player inside a group, derived from played matches.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupRanking {
    pub id: Uuid,
    pub group_id: GroupId,
    pub player_id: PlayerId,
    pub points: u32,
    pub matches_played: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
}

impl GroupRanking {
    /// Empty ranking row for a member who has not played yet.
    pub fn new(group_id: GroupId, player_id: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            player_id,
            ..Self::default()
        }
    }

    /// Add one played match: goals scored and conceded by this player's team.
    pub fn record(&mut self, goals_for: u32, goals_against: u32) {
        self.matches_played = self.matches_played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(goals_for);
        self.goals_against = self.goals_against.saturating_add(goals_against);
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => {
                self.matches_won = self.matches_won.saturating_add(1);
                self.points = self.points.saturating_add(POINTS_FOR_WIN);
            }
            std::cmp::Ordering::Less => self.matches_lost = self.matches_lost.saturating_add(1),
            std::cmp::Ordering::Equal => self.points = self.points.saturating_add(POINTS_FOR_DRAW),
        }
    }
}

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_saturates_instead_of_overflowing() {
        let mut row = GroupRanking::new(Uuid::new_v4(), Uuid::new_v4());
        row.record(u32::MAX, 0);
        row.record(u32::MAX, 1);
        assert_eq!(row.goals_for, u32::MAX);
        assert_eq!(row.goals_against, 1);
        assert_eq!(row.matches_won, 2);
        assert_eq!(row.points, 2 * POINTS_FOR_WIN);
        assert_eq!(row.goal_difference, i64::from(u32::MAX) - 1);
    }
}
