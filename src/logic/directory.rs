//! Player registry and tournament records: the thin CRUD the engine reads its rosters from.

use crate::models::{
    EngineError, EngineResult, GameMatch, GroupWithMembers, NewTournament, Player, PlayerId,
    StorageError, Tournament, TournamentId,
};
use crate::store::{Repository, UnitOfWork};

/// Fetch a tournament or fail with `NotFound`.
pub(crate) fn require_tournament(
    uow: &dyn UnitOfWork,
    tournament_id: TournamentId,
) -> EngineResult<Tournament> {
    uow.tournament(tournament_id)?.ok_or(EngineError::NotFound {
        entity: "tournament",
        id: tournament_id,
    })
}

/// Register a player. Email addresses are unique (case-insensitive).
pub fn create_player<R: Repository>(repo: &R, name: &str, email: &str) -> EngineResult<Player> {
    let player = Player::new(name, email);
    if player.name.is_empty() {
        return Err(EngineError::Validation("Please enter a player name".into()));
    }
    if !is_plausible_email(&player.email) {
        return Err(EngineError::Validation("Please enter a valid email address".into()));
    }
    repo.transaction(|uow| match uow.insert_player(player.clone()) {
        Ok(()) => Ok(player),
        Err(StorageError::UniqueViolation { index: "player_email" }) => Err(
            EngineError::Validation("A player with this email already exists".into()),
        ),
        Err(e) => Err(e.into()),
    })
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

pub fn list_players<R: Repository>(repo: &R) -> EngineResult<Vec<Player>> {
    repo.transaction(|uow| Ok(uow.players()?))
}

pub fn create_tournament<R: Repository>(repo: &R, input: NewTournament) -> EngineResult<Tournament> {
    let tournament = Tournament::create(input)?;
    repo.transaction(|uow| {
        uow.insert_tournament(tournament.clone())?;
        Ok(tournament)
    })
}

pub fn list_tournaments<R: Repository>(repo: &R) -> EngineResult<Vec<Tournament>> {
    repo.transaction(|uow| Ok(uow.tournaments()?))
}

pub fn get_tournament<R: Repository>(repo: &R, tournament_id: TournamentId) -> EngineResult<Tournament> {
    repo.transaction(|uow| require_tournament(uow, tournament_id))
}

/// Add a player to a tournament's roster and return the updated roster.
pub fn enroll_player<R: Repository>(
    repo: &R,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> EngineResult<Vec<Player>> {
    repo.transaction(|uow| {
        let tournament = require_tournament(uow, tournament_id)?;
        if uow.player(player_id)?.is_none() {
            return Err(EngineError::NotFound { entity: "player", id: player_id });
        }
        let roster = uow.roster(tournament_id)?;
        if roster.contains(&player_id) {
            return Err(EngineError::Validation(
                "Player is already registered to this tournament".into(),
            ));
        }
        if roster.len() >= tournament.max_players {
            return Err(EngineError::Validation(format!(
                "Tournament is full ({} players)",
                tournament.max_players
            )));
        }
        uow.enroll(tournament_id, player_id)?;
        roster_players(uow, tournament_id)
    })
}

/// Registered players of a tournament, in registration order.
pub fn tournament_roster<R: Repository>(repo: &R, tournament_id: TournamentId) -> EngineResult<Vec<Player>> {
    repo.transaction(|uow| {
        require_tournament(uow, tournament_id)?;
        roster_players(uow, tournament_id)
    })
}

fn roster_players(uow: &dyn UnitOfWork, tournament_id: TournamentId) -> EngineResult<Vec<Player>> {
    let mut players = Vec::new();
    for id in uow.roster(tournament_id)? {
        let player = uow
            .player(id)?
            .ok_or(StorageError::MissingRow { table: "players", id })?;
        players.push(player);
    }
    Ok(players)
}

pub fn tournament_groups<R: Repository>(
    repo: &R,
    tournament_id: TournamentId,
) -> EngineResult<Vec<GroupWithMembers>> {
    repo.transaction(|uow| {
        require_tournament(uow, tournament_id)?;
        let mut groups = Vec::new();
        for group in uow.groups(tournament_id)? {
            let players = uow.group_members(group.id)?;
            groups.push(GroupWithMembers { group, players });
        }
        Ok(groups)
    })
}

pub fn tournament_matches<R: Repository>(
    repo: &R,
    tournament_id: TournamentId,
) -> EngineResult<Vec<GameMatch>> {
    repo.transaction(|uow| {
        require_tournament(uow, tournament_id)?;
        Ok(uow.tournament_matches(tournament_id)?)
    })
}
