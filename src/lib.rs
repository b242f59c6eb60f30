//! Doubles tournament web app: library with models, storage and the group/match engine.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    create_player, create_tournament, enroll_player, generate_matches, get_tournament,
    group_standings, lineups, list_players, list_tournaments, make_groups, record_result,
    regenerate_groups, regenerate_matches, resolve_team, tournament_groups, tournament_matches,
    tournament_roster, Shuffler,
};
pub use models::{
    EngineError, EngineResult, GameMatch, Group, GroupId, GroupRanking, GroupWithMembers, MatchId,
    NewTournament, Player, PlayerId, PlayerPair, Stage, StorageError, Team, TeamId, Tournament,
    TournamentId,
};
pub use store::{MemoryStore, Repository, UnitOfWork};
