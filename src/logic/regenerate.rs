//! Regeneration: wipe derived groups or matches for a tournament and build them again.

use crate::logic::directory::require_tournament;
use crate::logic::grouping::{group_name, make_groups};
use crate::logic::scheduling::generate_matches;
use crate::logic::shuffle::Shuffler;
use crate::models::{
    EngineError, EngineResult, GameMatch, Group, GroupId, GroupMember, GroupWithMembers, TeamId,
    TournamentId,
};
use crate::store::{Repository, UnitOfWork};

/// Redraw the groups of a tournament in one transaction.
///
/// Deletes the tournament's matches (and the teams only they used), then
/// ranking rows, membership rows and groups, in that order; draws new groups
/// from the current roster and persists them. Any failure rolls everything
/// back, so the previous groups survive.
pub fn regenerate_groups<R: Repository>(
    repo: &R,
    shuffler: &mut Shuffler,
    tournament_id: TournamentId,
) -> EngineResult<Vec<GroupWithMembers>> {
    repo.transaction(|uow| {
        require_tournament(uow, tournament_id)?;
        let roster = uow.roster(tournament_id)?;
        if roster.is_empty() {
            return Err(EngineError::Validation(
                "Tournament has no players to group".into(),
            ));
        }

        for group in uow.groups(tournament_id)? {
            clear_group_matches(uow, group.id)?;
        }
        let rankings = uow.delete_group_rankings(tournament_id)?;
        let members = uow.delete_group_members(tournament_id)?;
        let groups = uow.delete_groups(tournament_id)?;
        log::debug!(
            "Tournament {}: removed {} group(s), {} member row(s), {} ranking row(s)",
            tournament_id,
            groups,
            members,
            rankings
        );

        let mut created = Vec::new();
        for (index, players) in make_groups(&roster, shuffler).into_iter().enumerate() {
            let group = Group::new(tournament_id, group_name(index));
            uow.insert_group(group.clone())?;
            for &player_id in &players {
                uow.insert_group_member(GroupMember::new(group.id, player_id))?;
            }
            created.push(GroupWithMembers { group, players });
        }

        log::info!(
            "Tournament {}: drew {} group(s) from {} player(s)",
            tournament_id,
            created.len(),
            roster.len()
        );
        Ok(created)
    })
}

/// Rebuild the match schedule of every group of a tournament.
///
/// Each group is one transaction: its matches are deleted, teams no surviving
/// match references are deleted (member links first), and a new schedule is
/// generated from the group's current members. A failure stops at that group:
/// groups before it keep their new schedule, the failing group and those after
/// it keep their old one.
pub fn regenerate_matches<R: Repository>(
    repo: &R,
    shuffler: &mut Shuffler,
    tournament_id: TournamentId,
) -> EngineResult<Vec<GameMatch>> {
    let groups = repo.transaction(|uow| {
        require_tournament(uow, tournament_id)?;
        Ok(uow.groups(tournament_id)?)
    })?;
    if groups.is_empty() {
        log::warn!("Tournament {} has no groups; no matches generated", tournament_id);
    }

    let mut all = Vec::new();
    for group in groups {
        let matches = repo.transaction(|uow| {
            let removed_teams = clear_group_matches(uow, group.id)?;
            let players = uow.group_members(group.id)?;
            let matches = generate_matches(uow, shuffler, tournament_id, group.id, &players)?;
            log::info!(
                "{} ({}): scheduled {} match(es) for {} player(s), removed {} stale team(s)",
                group.name,
                group.id,
                matches.len(),
                players.len(),
                removed_teams
            );
            Ok(matches)
        })?;
        all.extend(matches);
    }
    Ok(all)
}

/// Delete a group's matches and every team that no remaining match references.
/// Returns the number of teams deleted.
fn clear_group_matches(uow: &mut dyn UnitOfWork, group_id: GroupId) -> EngineResult<usize> {
    let deleted = uow.delete_group_matches(group_id)?;
    let mut team_ids: Vec<TeamId> = deleted
        .iter()
        .flat_map(|m| [m.home_team.id, m.away_team.id])
        .collect();
    team_ids.sort();
    team_ids.dedup();

    let mut removed = 0;
    for team_id in team_ids {
        // Teams are shared; one may still be scheduled in another group or tournament.
        if uow.team_is_referenced(team_id)? {
            continue;
        }
        uow.delete_team_members(team_id)?;
        uow.delete_team(team_id)?;
        removed += 1;
    }
    Ok(removed)
}
