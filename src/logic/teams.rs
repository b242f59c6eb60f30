//! Team resolution: one team per unordered pair of players, system-wide.

use crate::models::{EngineError, EngineResult, PlayerId, PlayerPair, StorageError, Team};
use crate::store::{UnitOfWork, TEAM_PAIR_INDEX};

/// Return the team for `{a, b}`, creating it (with both member links) if it does not exist.
///
/// `resolve_team(a, b)` and `resolve_team(b, a)` return the same team. If another
/// writer created the team between our lookup and our insert, the store's pair
/// index rejects the insert and the existing row is returned instead.
pub fn resolve_team(uow: &mut dyn UnitOfWork, a: PlayerId, b: PlayerId) -> EngineResult<Team> {
    let pair = PlayerPair::new(a, b).ok_or_else(|| {
        EngineError::Validation(format!("A team needs two different players, got {} twice", a))
    })?;

    match uow.team_by_pair(pair)? {
        Some(team) => Ok(team),
        None => create_team(uow, pair),
    }
}

/// Insert a team for `pair`; on a pair-index violation return the row that won.
fn create_team(uow: &mut dyn UnitOfWork, pair: PlayerPair) -> EngineResult<Team> {
    let team = Team::new(pair);
    match uow.insert_team(team.clone()) {
        Ok(()) => {
            log::debug!("Created team {} ({})", team.name, team.id);
            Ok(team)
        }
        Err(StorageError::UniqueViolation { index }) if index == TEAM_PAIR_INDEX => {
            log::debug!("Team for {:?} already exists, reusing it", pair);
            uow.team_by_pair(pair)?
                .ok_or(EngineError::Storage(StorageError::UniqueViolation { index }))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Repository};
    use uuid::Uuid;

    #[test]
    fn insert_race_falls_back_to_the_existing_team() {
        let store = MemoryStore::new();
        let pair = PlayerPair::new(Uuid::new_v4(), Uuid::new_v4()).unwrap();
        let existing = Team::new(pair);
        let (created, teams) = store
            .transaction(|uow| {
                uow.insert_team(existing.clone())?;
                let created = create_team(uow, pair)?;
                Ok((created, uow.teams()?))
            })
            .unwrap();
        assert_eq!(created.id, existing.id);
        assert_eq!(teams.len(), 1);
    }
}
