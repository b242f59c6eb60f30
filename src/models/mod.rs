//! Data structures for the doubles tournament: players, groups, teams, matches.

mod error;
mod game;
mod group;
mod player;
mod team;
mod tournament;

pub use error::{EngineError, EngineResult, StorageError};
pub use game::{GameMatch, MatchId, Stage};
pub use group::{
    Group, GroupId, GroupMember, GroupRanking, GroupWithMembers, GROUP_ROUND, POINTS_FOR_DRAW,
    POINTS_FOR_WIN,
};
pub use player::{Player, PlayerId};
pub use team::{PlayerPair, Team, TeamId, TeamMember};
pub use tournament::{NewTournament, Tournament, TournamentId, DEFAULT_MAX_PLAYERS};
