//! Match (game) between two doubles teams, and the stage it belongs to.

use crate::models::group::GroupId;
use crate::models::team::{Team, TeamId};
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Phase of the tournament this match belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    #[serde(rename = "Group Stage")]
    GroupStage,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::GroupStage => write!(f, "Group Stage"),
        }
    }
}

/// A single 2v2 match inside a group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub group_id: GroupId,
    pub stage: Stage,
    pub scheduled_at: DateTime<Utc>,
    pub home_team: Team,
    pub away_team: Team,
    pub home_score: u32,
    pub away_score: u32,
    pub is_played: bool,
    /// None until played, and also None after a draw.
    pub winner_team: Option<TeamId>,
}

impl GameMatch {
    /// Unplayed group-stage match, 0–0.
    pub fn new(
        tournament_id: TournamentId,
        group_id: GroupId,
        home_team: Team,
        away_team: Team,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            group_id,
            stage: Stage::GroupStage,
            scheduled_at,
            home_team,
            away_team,
            home_score: 0,
            away_score: 0,
            is_played: false,
            winner_team: None,
        }
    }

    /// True if either side is the given team.
    pub fn involves_team(&self, team_id: TeamId) -> bool {
        self.home_team.id == team_id || self.away_team.id == team_id
    }

    /// Set the final score and derive the winner.
    pub fn set_result(&mut self, home_score: u32, away_score: u32) {
        self.home_score = home_score;
        self.away_score = away_score;
        self.is_played = true;
        self.winner_team = match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => Some(self.home_team.id),
            std::cmp::Ordering::Less => Some(self.away_team.id),
            std::cmp::Ordering::Equal => None,
        };
    }
}
