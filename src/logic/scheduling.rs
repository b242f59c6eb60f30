//! Match generation for one group: randomized preset → teams → matches.

use crate::logic::grouping::TARGET_GROUP_SIZE;
use crate::logic::presets::{preset_for, randomize, PresetMatch, FOUR_PLAYERS};
use crate::logic::shuffle::Shuffler;
use crate::logic::teams::resolve_team;
use crate::models::{EngineResult, GameMatch, GroupId, PlayerId, TournamentId};
use crate::store::UnitOfWork;
use chrono::Utc;

/// Home and away player pairs of one scheduled match.
pub type Lineup = ([PlayerId; 2], [PlayerId; 2]);

/// Map preset slots onto players (slot k is `players[k - 1]`).
///
/// Every slot in `preset` must be within `1..=players.len()`.
pub fn lineups(players: &[PlayerId], preset: &[PresetMatch]) -> Vec<Lineup> {
    let at = |slot: usize| players[slot - 1];
    preset
        .iter()
        .map(|(home, away)| ([at(home[0]), at(home[1])], [at(away[0]), at(away[1])]))
        .collect()
}

/// Generate and persist the group-stage matches of one group.
///
/// Players are shuffled into slots, the preset for the group size is randomized,
/// and each lineup's two teams are resolved (created if new). Matches are
/// persisted and returned in the randomized preset order, all 0–0, unplayed,
/// and timestamped with the generation time.
///
/// Groups under 4 players get no matches. Groups over 6 use the 4-player preset
/// on the first four shuffled players. Nothing is deleted here; the first
/// failure aborts the rest of the group.
pub fn generate_matches(
    uow: &mut dyn UnitOfWork,
    shuffler: &mut Shuffler,
    tournament_id: TournamentId,
    group_id: GroupId,
    players: &[PlayerId],
) -> EngineResult<Vec<GameMatch>> {
    if players.len() < TARGET_GROUP_SIZE {
        log::warn!(
            "Group {} has {} player(s); skipping match generation",
            group_id,
            players.len()
        );
        return Ok(Vec::new());
    }

    let slots = shuffler.shuffle(players.to_vec());
    let preset = preset_for(slots.len()).unwrap_or_else(|| {
        log::warn!(
            "No preset for {} players in group {}; scheduling the first {} only",
            slots.len(),
            group_id,
            TARGET_GROUP_SIZE
        );
        FOUR_PLAYERS
    });

    let scheduled_at = Utc::now();
    let mut matches = Vec::with_capacity(preset.len());
    for (home, away) in lineups(&slots, &randomize(preset, shuffler)) {
        let home_team = resolve_team(uow, home[0], home[1])?;
        let away_team = resolve_team(uow, away[0], away[1])?;
        let game = GameMatch::new(tournament_id, group_id, home_team, away_team, scheduled_at);
        uow.insert_match(game.clone())?;
        matches.push(game);
    }
    Ok(matches)
}
