//! In-memory store: every table lives behind one mutex.
//!
//! A transaction locks the tables, works on a copy, and swaps the copy in on
//! success. Dropping the copy is the rollback. Transactions are therefore
//! serializable, and the unique/foreign-key checks below play the role of the
//! constraints a relational schema would declare.

use crate::models::{
    EngineResult, GameMatch, Group, GroupId, GroupMember, GroupRanking, MatchId, Player,
    PlayerId, PlayerPair, StorageError, Team, TeamId, TeamMember, Tournament, TournamentId,
};
use crate::store::{Repository, UnitOfWork, TEAM_PAIR_INDEX};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone, Debug, Default)]
struct Tables {
    players: Vec<Player>,
    tournaments: Vec<Tournament>,
    enrollments: Vec<(TournamentId, PlayerId)>,
    groups: Vec<Group>,
    group_members: Vec<GroupMember>,
    group_rankings: Vec<GroupRanking>,
    teams: HashMap<TeamId, Team>,
    team_pairs: HashMap<PlayerPair, TeamId>,
    team_members: Vec<TeamMember>,
    matches: Vec<GameMatch>,
    #[cfg(test)]
    fail_writes_to: Option<&'static str>,
    #[cfg(test)]
    fail_match_writes_for: Option<GroupId>,
}

/// Thread-safe in-memory [`Repository`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later write to `table` fail with [`StorageError::WriteFailed`].
    #[cfg(test)]
    pub(crate) fn fail_writes_to(&self, table: &'static str) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.fail_writes_to = Some(table);
        }
    }

    /// Make every later match insert into `group_id` fail with [`StorageError::WriteFailed`].
    #[cfg(test)]
    pub(crate) fn fail_match_writes_for(&self, group_id: GroupId) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.fail_match_writes_for = Some(group_id);
        }
    }
}

impl Repository for MemoryStore {
    fn transaction<T, F>(&self, work: F) -> EngineResult<T>
    where
        F: FnOnce(&mut dyn UnitOfWork) -> EngineResult<T>,
    {
        let mut committed = self.tables.lock().map_err(|_| StorageError::Poisoned)?;
        let mut working = committed.clone();
        match work(&mut working) {
            Ok(value) => {
                *committed = working;
                Ok(value)
            }
            Err(e) => {
                log::debug!("Rolling back transaction: {}", e);
                Err(e)
            }
        }
    }
}

impl Tables {
    #[cfg(test)]
    fn check_write(&self, table: &'static str) -> Result<(), StorageError> {
        if self.fail_writes_to == Some(table) {
            return Err(StorageError::WriteFailed { table });
        }
        Ok(())
    }

    #[cfg(not(test))]
    fn check_write(&self, _table: &'static str) -> Result<(), StorageError> {
        Ok(())
    }

    #[cfg(test)]
    fn check_match_write(&self, group_id: GroupId) -> Result<(), StorageError> {
        self.check_write("matches")?;
        if self.fail_match_writes_for == Some(group_id) {
            return Err(StorageError::WriteFailed { table: "matches" });
        }
        Ok(())
    }

    #[cfg(not(test))]
    fn check_match_write(&self, _group_id: GroupId) -> Result<(), StorageError> {
        Ok(())
    }

    fn group_ids_of(&self, tournament_id: TournamentId) -> Vec<GroupId> {
        self.groups
            .iter()
            .filter(|g| g.tournament_id == tournament_id)
            .map(|g| g.id)
            .collect()
    }
}

impl UnitOfWork for Tables {
    fn insert_player(&mut self, player: Player) -> Result<(), StorageError> {
        self.check_write("players")?;
        if self.players.iter().any(|p| p.id == player.id) {
            return Err(StorageError::UniqueViolation { index: "player_pkey" });
        }
        if self
            .players
            .iter()
            .any(|p| p.email.eq_ignore_ascii_case(&player.email))
        {
            return Err(StorageError::UniqueViolation { index: "player_email" });
        }
        self.players.push(player);
        Ok(())
    }

    fn player(&self, id: PlayerId) -> Result<Option<Player>, StorageError> {
        Ok(self.players.iter().find(|p| p.id == id).cloned())
    }

    fn players(&self) -> Result<Vec<Player>, StorageError> {
        Ok(self.players.clone())
    }

    fn insert_tournament(&mut self, tournament: Tournament) -> Result<(), StorageError> {
        self.check_write("tournaments")?;
        if self.tournaments.iter().any(|t| t.id == tournament.id) {
            return Err(StorageError::UniqueViolation { index: "tournament_pkey" });
        }
        self.tournaments.push(tournament);
        Ok(())
    }

    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StorageError> {
        Ok(self.tournaments.iter().find(|t| t.id == id).cloned())
    }

    fn tournaments(&self) -> Result<Vec<Tournament>, StorageError> {
        Ok(self.tournaments.clone())
    }

    fn enroll(&mut self, tournament_id: TournamentId, player_id: PlayerId) -> Result<(), StorageError> {
        self.check_write("tournament_players")?;
        if !self.tournaments.iter().any(|t| t.id == tournament_id) {
            return Err(StorageError::MissingRow { table: "tournaments", id: tournament_id });
        }
        if !self.players.iter().any(|p| p.id == player_id) {
            return Err(StorageError::MissingRow { table: "players", id: player_id });
        }
        if self.enrollments.contains(&(tournament_id, player_id)) {
            return Err(StorageError::UniqueViolation { index: "tournament_player" });
        }
        self.enrollments.push((tournament_id, player_id));
        Ok(())
    }

    fn roster(&self, tournament_id: TournamentId) -> Result<Vec<PlayerId>, StorageError> {
        Ok(self
            .enrollments
            .iter()
            .filter(|(t, _)| *t == tournament_id)
            .map(|(_, p)| *p)
            .collect())
    }

    fn insert_group(&mut self, group: Group) -> Result<(), StorageError> {
        self.check_write("groups")?;
        if !self.tournaments.iter().any(|t| t.id == group.tournament_id) {
            return Err(StorageError::MissingRow { table: "tournaments", id: group.tournament_id });
        }
        if self.groups.iter().any(|g| g.id == group.id) {
            return Err(StorageError::UniqueViolation { index: "group_pkey" });
        }
        self.groups.push(group);
        Ok(())
    }

    fn insert_group_member(&mut self, member: GroupMember) -> Result<(), StorageError> {
        self.check_write("group_members")?;
        let tournament_id = self
            .groups
            .iter()
            .find(|g| g.id == member.group_id)
            .map(|g| g.tournament_id)
            .ok_or(StorageError::MissingRow { table: "groups", id: member.group_id })?;
        // A player sits in at most one group of a tournament.
        let sibling_groups = self.group_ids_of(tournament_id);
        if self
            .group_members
            .iter()
            .any(|m| m.player_id == member.player_id && sibling_groups.contains(&m.group_id))
        {
            return Err(StorageError::UniqueViolation { index: "group_member_player" });
        }
        self.group_members.push(member);
        Ok(())
    }

    fn group(&self, id: GroupId) -> Result<Option<Group>, StorageError> {
        Ok(self.groups.iter().find(|g| g.id == id).cloned())
    }

    fn groups(&self, tournament_id: TournamentId) -> Result<Vec<Group>, StorageError> {
        Ok(self
            .groups
            .iter()
            .filter(|g| g.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    fn group_members(&self, group_id: GroupId) -> Result<Vec<PlayerId>, StorageError> {
        Ok(self
            .group_members
            .iter()
            .filter(|m| m.group_id == group_id)
            .map(|m| m.player_id)
            .collect())
    }

    fn group_rankings(&self, group_id: GroupId) -> Result<Vec<GroupRanking>, StorageError> {
        Ok(self
            .group_rankings
            .iter()
            .filter(|r| r.group_id == group_id)
            .cloned()
            .collect())
    }

    fn replace_group_rankings(
        &mut self,
        group_id: GroupId,
        rankings: Vec<GroupRanking>,
    ) -> Result<(), StorageError> {
        self.check_write("group_rankings")?;
        if !self.groups.iter().any(|g| g.id == group_id) {
            return Err(StorageError::MissingRow { table: "groups", id: group_id });
        }
        self.group_rankings.retain(|r| r.group_id != group_id);
        self.group_rankings.extend(rankings);
        Ok(())
    }

    fn delete_group_rankings(&mut self, tournament_id: TournamentId) -> Result<usize, StorageError> {
        self.check_write("group_rankings")?;
        let ids = self.group_ids_of(tournament_id);
        let before = self.group_rankings.len();
        self.group_rankings.retain(|r| !ids.contains(&r.group_id));
        Ok(before - self.group_rankings.len())
    }

    fn delete_group_members(&mut self, tournament_id: TournamentId) -> Result<usize, StorageError> {
        self.check_write("group_members")?;
        let ids = self.group_ids_of(tournament_id);
        let before = self.group_members.len();
        self.group_members.retain(|m| !ids.contains(&m.group_id));
        Ok(before - self.group_members.len())
    }

    fn delete_groups(&mut self, tournament_id: TournamentId) -> Result<usize, StorageError> {
        self.check_write("groups")?;
        let ids = self.group_ids_of(tournament_id);
        for &id in &ids {
            let referenced = self.group_members.iter().any(|m| m.group_id == id)
                || self.group_rankings.iter().any(|r| r.group_id == id)
                || self.matches.iter().any(|m| m.group_id == id);
            if referenced {
                return Err(StorageError::ForeignKeyViolation { table: "groups", id });
            }
        }
        self.groups.retain(|g| g.tournament_id != tournament_id);
        Ok(ids.len())
    }

    fn team_by_pair(&self, pair: PlayerPair) -> Result<Option<Team>, StorageError> {
        Ok(self
            .team_pairs
            .get(&pair)
            .and_then(|id| self.teams.get(id))
            .cloned())
    }

    fn insert_team(&mut self, team: Team) -> Result<(), StorageError> {
        self.check_write("teams")?;
        if self.team_pairs.contains_key(&team.players) {
            return Err(StorageError::UniqueViolation { index: TEAM_PAIR_INDEX });
        }
        if self.teams.contains_key(&team.id) {
            return Err(StorageError::UniqueViolation { index: "team_pkey" });
        }
        for player_id in team.players.members() {
            self.team_members.push(TeamMember { team_id: team.id, player_id });
        }
        self.team_pairs.insert(team.players, team.id);
        self.teams.insert(team.id, team);
        Ok(())
    }

    fn teams(&self) -> Result<Vec<Team>, StorageError> {
        Ok(self.teams.values().cloned().collect())
    }

    fn team_members(&self, team_id: TeamId) -> Result<Vec<PlayerId>, StorageError> {
        Ok(self
            .team_members
            .iter()
            .filter(|m| m.team_id == team_id)
            .map(|m| m.player_id)
            .collect())
    }

    fn delete_team_members(&mut self, team_id: TeamId) -> Result<usize, StorageError> {
        self.check_write("team_members")?;
        let before = self.team_members.len();
        self.team_members.retain(|m| m.team_id != team_id);
        Ok(before - self.team_members.len())
    }

    fn delete_team(&mut self, team_id: TeamId) -> Result<bool, StorageError> {
        self.check_write("teams")?;
        let referenced = self.team_members.iter().any(|m| m.team_id == team_id)
            || self.matches.iter().any(|m| m.involves_team(team_id));
        if referenced {
            return Err(StorageError::ForeignKeyViolation { table: "teams", id: team_id });
        }
        match self.teams.remove(&team_id) {
            Some(team) => {
                self.team_pairs.remove(&team.players);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn insert_match(&mut self, game: GameMatch) -> Result<(), StorageError> {
        self.check_match_write(game.group_id)?;
        if !self.groups.iter().any(|g| g.id == game.group_id) {
            return Err(StorageError::MissingRow { table: "groups", id: game.group_id });
        }
        for team in [&game.home_team, &game.away_team] {
            if !self.teams.contains_key(&team.id) {
                return Err(StorageError::MissingRow { table: "teams", id: team.id });
            }
        }
        if self.matches.iter().any(|m| m.id == game.id) {
            return Err(StorageError::UniqueViolation { index: "match_pkey" });
        }
        self.matches.push(game);
        Ok(())
    }

    fn update_match(&mut self, game: GameMatch) -> Result<(), StorageError> {
        self.check_write("matches")?;
        let slot = self
            .matches
            .iter_mut()
            .find(|m| m.id == game.id)
            .ok_or(StorageError::MissingRow { table: "matches", id: game.id })?;
        *slot = game;
        Ok(())
    }

    fn game_match(&self, id: MatchId) -> Result<Option<GameMatch>, StorageError> {
        Ok(self.matches.iter().find(|m| m.id == id).cloned())
    }

    fn group_matches(&self, group_id: GroupId) -> Result<Vec<GameMatch>, StorageError> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect())
    }

    fn tournament_matches(&self, tournament_id: TournamentId) -> Result<Vec<GameMatch>, StorageError> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    fn delete_group_matches(&mut self, group_id: GroupId) -> Result<Vec<GameMatch>, StorageError> {
        self.check_write("matches")?;
        let (deleted, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.matches)
            .into_iter()
            .partition(|m| m.group_id == group_id);
        self.matches = kept;
        Ok(deleted)
    }

    fn team_is_referenced(&self, team_id: TeamId) -> Result<bool, StorageError> {
        Ok(self.matches.iter().any(|m| m.involves_team(team_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EngineError, NewTournament};
    use chrono::NaiveDate;

    fn tournament() -> Tournament {
        Tournament::create(NewTournament {
            name: "Cup".into(),
            game_type: "Foosball".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            max_players: 16,
        })
        .unwrap()
    }

    #[test]
    fn second_team_for_same_pair_is_rejected() {
        let store = MemoryStore::new();
        let a = uuid::Uuid::new_v4();
        let b = uuid::Uuid::new_v4();
        let err = store
            .transaction(|uow| {
                uow.insert_team(Team::new(PlayerPair::new(a, b).unwrap()))?;
                uow.insert_team(Team::new(PlayerPair::new(b, a).unwrap()))?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Storage(StorageError::UniqueViolation { index: TEAM_PAIR_INDEX })
        );
    }

    #[test]
    fn failed_transaction_rolls_back_every_write() {
        let store = MemoryStore::new();
        let t = tournament();
        let id = t.id;
        let result: EngineResult<()> = store.transaction(|uow| {
            uow.insert_tournament(t)?;
            uow.insert_group(Group::new(id, "Group 1"))?;
            Err(EngineError::Validation("abort".into()))
        });
        assert!(result.is_err());
        let tournaments = store.transaction(|uow| Ok(uow.tournaments()?)).unwrap();
        assert!(tournaments.is_empty());
    }

    #[test]
    fn team_cannot_be_deleted_before_its_member_links() {
        let store = MemoryStore::new();
        let team = Team::new(PlayerPair::new(uuid::Uuid::new_v4(), uuid::Uuid::new_v4()).unwrap());
        let team_id = team.id;
        store.transaction(|uow| Ok(uow.insert_team(team)?)).unwrap();

        let err = store
            .transaction(|uow| Ok(uow.delete_team(team_id)?))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Storage(StorageError::ForeignKeyViolation { table: "teams", .. })
        ));

        let deleted = store
            .transaction(|uow| {
                assert_eq!(uow.delete_team_members(team_id)?, 2);
                Ok(uow.delete_team(team_id)?)
            })
            .unwrap();
        assert!(deleted);
    }

    #[test]
    fn player_can_only_join_one_group_per_tournament() {
        let store = MemoryStore::new();
        let t = tournament();
        let tid = t.id;
        let player = uuid::Uuid::new_v4();
        let err = store
            .transaction(|uow| {
                uow.insert_tournament(t)?;
                let g1 = Group::new(tid, "Group 1");
                let g2 = Group::new(tid, "Group 2");
                let (id1, id2) = (g1.id, g2.id);
                uow.insert_group(g1)?;
                uow.insert_group(g2)?;
                uow.insert_group_member(GroupMember::new(id1, player))?;
                uow.insert_group_member(GroupMember::new(id2, player))?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Storage(StorageError::UniqueViolation { index: "group_member_player" })
        );
    }
}
