//! Persistence layer used by the engine.
//!
//! Engine code only talks to [`Repository`] (to open an atomic unit of work) and
//! [`UnitOfWork`] (the create/delete/query operations available inside it). The
//! only storage rule the engine relies on is the unique index on a team's
//! normalized player pair: [`UnitOfWork::insert_team`] must reject a second team
//! for a pair with [`StorageError::UniqueViolation`].

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    EngineResult, GameMatch, Group, GroupId, GroupMember, GroupRanking, MatchId, Player,
    PlayerId, PlayerPair, StorageError, Team, TeamId, Tournament, TournamentId,
};

/// Name of the unique index on normalized team pairs.
pub const TEAM_PAIR_INDEX: &str = "team_player_pair";

/// Opens atomic units of work.
pub trait Repository {
    /// Run `work` inside one transaction. All of its writes become visible
    /// together when it returns `Ok`; none of them do when it returns `Err`.
    fn transaction<T, F>(&self, work: F) -> EngineResult<T>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> EngineResult<T>;
}

/// Operations available inside a transaction.
pub trait UnitOfWork {
    // Directory
    fn insert_player(&mut self, player: Player) -> Result<(), StorageError>;
    fn player(&self, id: PlayerId) -> Result<Option<Player>, StorageError>;
    fn players(&self) -> Result<Vec<Player>, StorageError>;
    fn insert_tournament(&mut self, tournament: Tournament) -> Result<(), StorageError>;
    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StorageError>;
    fn tournaments(&self) -> Result<Vec<Tournament>, StorageError>;
    /// Enroll a player. Unique per (tournament, player).
    fn enroll(&mut self, tournament_id: TournamentId, player_id: PlayerId) -> Result<(), StorageError>;
    /// Enrolled player ids in enrollment order.
    fn roster(&self, tournament_id: TournamentId) -> Result<Vec<PlayerId>, StorageError>;

    // Groups
    fn insert_group(&mut self, group: Group) -> Result<(), StorageError>;
    fn insert_group_member(&mut self, member: GroupMember) -> Result<(), StorageError>;
    fn group(&self, id: GroupId) -> Result<Option<Group>, StorageError>;
    /// Groups of a tournament in creation order.
    fn groups(&self, tournament_id: TournamentId) -> Result<Vec<Group>, StorageError>;
    fn group_members(&self, group_id: GroupId) -> Result<Vec<PlayerId>, StorageError>;
    fn group_rankings(&self, group_id: GroupId) -> Result<Vec<GroupRanking>, StorageError>;
    fn replace_group_rankings(
        &mut self,
        group_id: GroupId,
        rankings: Vec<GroupRanking>,
    ) -> Result<(), StorageError>;
    fn delete_group_rankings(&mut self, tournament_id: TournamentId) -> Result<usize, StorageError>;
    fn delete_group_members(&mut self, tournament_id: TournamentId) -> Result<usize, StorageError>;
    fn delete_groups(&mut self, tournament_id: TournamentId) -> Result<usize, StorageError>;

    // Teams
    fn team_by_pair(&self, pair: PlayerPair) -> Result<Option<Team>, StorageError>;
    /// Insert a team together with both of its member links.
    fn insert_team(&mut self, team: Team) -> Result<(), StorageError>;
    fn teams(&self) -> Result<Vec<Team>, StorageError>;
    fn team_members(&self, team_id: TeamId) -> Result<Vec<PlayerId>, StorageError>;
    fn delete_team_members(&mut self, team_id: TeamId) -> Result<usize, StorageError>;
    fn delete_team(&mut self, team_id: TeamId) -> Result<bool, StorageError>;

    // Matches
    fn insert_match(&mut self, game: GameMatch) -> Result<(), StorageError>;
    fn update_match(&mut self, game: GameMatch) -> Result<(), StorageError>;
    fn game_match(&self, id: MatchId) -> Result<Option<GameMatch>, StorageError>;
    /// Matches of a group in insertion order.
    fn group_matches(&self, group_id: GroupId) -> Result<Vec<GameMatch>, StorageError>;
    fn tournament_matches(&self, tournament_id: TournamentId) -> Result<Vec<GameMatch>, StorageError>;
    /// Delete a group's matches and return them.
    fn delete_group_matches(&mut self, group_id: GroupId) -> Result<Vec<GameMatch>, StorageError>;
    fn team_is_referenced(&self, team_id: TeamId) -> Result<bool, StorageError>;
}
