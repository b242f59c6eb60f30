//! Match results and group standings.

use crate::models::{EngineError, EngineResult, GameMatch, GroupId, GroupRanking, MatchId};
use crate::store::{Repository, UnitOfWork};

/// Highest score accepted for one side of a match.
pub const MAX_SCORE: u32 = 999;

/// Record the final score of a match and refresh its group's ranking rows.
///
/// Re-recording overwrites the previous score. Scores above [`MAX_SCORE`] are rejected.
pub fn record_result<R: Repository>(
    repo: &R,
    match_id: MatchId,
    home_score: u32,
    away_score: u32,
) -> EngineResult<GameMatch> {
    if home_score > MAX_SCORE || away_score > MAX_SCORE {
        return Err(EngineError::Validation(format!(
            "Score {}-{} is out of range (0-{})",
            home_score, away_score, MAX_SCORE
        )));
    }
    repo.transaction(|uow| {
        let mut game = uow
            .game_match(match_id)?
            .ok_or(EngineError::NotFound { entity: "match", id: match_id })?;
        game.set_result(home_score, away_score);
        uow.update_match(game.clone())?;
        refresh_rankings(uow, game.group_id)?;
        log::info!(
            "Match {}: {} {}-{} {}",
            game.id,
            game.home_team.name,
            home_score,
            away_score,
            game.away_team.name
        );
        Ok(game)
    })
}

/// Standings of a group, best first. Members without a played match show up with zeroes.
pub fn group_standings<R: Repository>(repo: &R, group_id: GroupId) -> EngineResult<Vec<GroupRanking>> {
    repo.transaction(|uow| {
        if uow.group(group_id)?.is_none() {
            return Err(EngineError::NotFound { entity: "group", id: group_id });
        }
        let mut rankings = uow.group_rankings(group_id)?;
        for player_id in uow.group_members(group_id)? {
            if !rankings.iter().any(|r| r.player_id == player_id) {
                rankings.push(GroupRanking::new(group_id, player_id));
            }
        }
        sort_standings(&mut rankings);
        Ok(rankings)
    })
}

/// Recompute every member's ranking row from the group's played matches.
/// Each player on a team is credited with the team's result.
fn refresh_rankings(uow: &mut dyn UnitOfWork, group_id: GroupId) -> EngineResult<()> {
    let mut rankings: Vec<GroupRanking> = uow
        .group_members(group_id)?
        .into_iter()
        .map(|player_id| GroupRanking::new(group_id, player_id))
        .collect();

    for game in uow.group_matches(group_id)?.iter().filter(|m| m.is_played) {
        let sides = [
            (&game.home_team, game.home_score, game.away_score),
            (&game.away_team, game.away_score, game.home_score),
        ];
        for (team, goals_for, goals_against) in sides {
            for player_id in team.players.members() {
                if let Some(row) = rankings.iter_mut().find(|r| r.player_id == player_id) {
                    row.record(goals_for, goals_against);
                }
            }
        }
    }

    sort_standings(&mut rankings);
    uow.replace_group_rankings(group_id, rankings)?;
    Ok(())
}

/// Points, then goal difference, then goals scored; all descending.
fn sort_standings(rankings: &mut [GroupRanking]) {
    rankings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });
}
